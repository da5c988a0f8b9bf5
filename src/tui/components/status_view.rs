//! # Status View
//!
//! Fills the body while a screen has no data to show: a spinner while
//! loading, or the error message with a retry hint.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::palette::Palette;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub enum Status<'a> {
    Loading { spinner_frame: usize },
    Error(&'a str),
}

pub struct StatusView<'a> {
    pub status: Status<'a>,
    pub palette: Palette,
}

impl Component for StatusView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (title, lines, border) = match &self.status {
            Status::Loading { spinner_frame } => (
                " Loading ",
                vec![Line::from(Span::styled(
                    format!("{} Fetching market data...", SPINNER[spinner_frame % SPINNER.len()]),
                    Style::default().fg(self.palette.accent),
                ))],
                self.palette.border(),
            ),
            Status::Error(message) => (
                " Error ",
                vec![
                    Line::from(Span::styled(
                        message.to_string(),
                        Style::default().fg(self.palette.negative),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Press Enter or r to try again",
                        Style::default().fg(self.palette.dim),
                    )),
                ],
                Style::default().fg(self.palette.negative),
            ),
        };

        // Vertically center
        let top = area.height.saturating_sub(lines.len() as u16 + 2) / 2;
        let mut padded = vec![Line::from(""); top as usize];
        padded.extend(lines);

        let paragraph = Paragraph::new(padded)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(title),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
