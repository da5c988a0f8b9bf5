//! # Search Box
//!
//! One-line filter input. The term itself lives in `HomeViewModel`;
//! this component turns key events into a new term and draws it.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

/// Input state for the search field: a copy of the current term.
pub struct SearchInput {
    value: String,
}

/// Emitted when the term changes.
#[derive(Debug, PartialEq, Eq)]
pub struct SearchChanged(pub String);

impl SearchInput {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

impl EventHandler for SearchInput {
    type Event = SearchChanged;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SearchChanged> {
        match event {
            TuiEvent::InputChar(c) if !c.is_control() => self.value.push(*c),
            // Multi-line pastes collapse to the first line
            TuiEvent::Paste(text) => {
                let line = text.lines().next().unwrap_or("").trim();
                if line.is_empty() {
                    return None;
                }
                self.value.push_str(line);
            }
            TuiEvent::Backspace => {
                self.value.pop()?;
            }
            TuiEvent::ClearSearch => {
                if self.value.is_empty() {
                    return None;
                }
                self.value.clear();
            }
            _ => return None,
        }
        Some(SearchChanged(self.value.clone()))
    }
}

/// Transient render wrapper for the search field.
pub struct SearchBox<'a> {
    pub value: &'a str,
    pub match_count: Option<usize>,
    pub palette: Palette,
}

impl Component for SearchBox<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = match self.match_count {
            Some(n) if !self.value.is_empty() => format!(" Search ({n} matches) "),
            _ => " Search ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.border())
            .title(title);

        let line = if self.value.is_empty() {
            Line::from(Span::styled(
                "type to filter by name",
                ratatui::style::Style::default().fg(self.palette.dim),
            ))
        } else {
            Line::from(Span::styled(self.value, self.palette.base()))
        };

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}
