//! # Details View
//!
//! Stateless key/value panel for a single coin.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::core::crypto::Crypto;
use crate::tui::component::Component;
use crate::tui::format::{format_amount, format_percent, format_total};
use crate::tui::palette::Palette;

const LABEL_WIDTH: usize = 14;

pub struct DetailsView<'a> {
    pub crypto: &'a Crypto,
    pub vs_currency: &'a str,
    pub palette: Palette,
}

impl DetailsView<'_> {
    fn row(&self, label: &str, value: String, style: Style) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!("{label:<LABEL_WIDTH$}"),
                Style::default().fg(self.palette.dim),
            ),
            Span::styled(value, style),
        ])
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let c = self.crypto;
        let base = self.palette.base();
        let currency = self.vs_currency.to_uppercase();
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} ({})", c.name, c.symbol.to_uppercase()),
                self.palette.title(),
            )),
            Line::from(""),
            self.row(
                "Rank",
                c.market_cap_rank
                    .map(|r| format!("#{r}"))
                    .unwrap_or_else(|| "-".to_string()),
                base,
            ),
            self.row(
                "Price",
                format!("{} {currency}", format_amount(c.current_price)),
                base,
            ),
            self.row(
                "24h change",
                format_percent(c.price_change_percentage_24h),
                self.palette.change(c.price_change_percentage_24h),
            ),
            self.row("24h high", format_amount(c.high_24h), base),
            self.row("24h low", format_amount(c.low_24h), base),
            self.row("Market cap", format_total(c.market_cap), base),
            self.row("Volume", format_total(c.total_volume), base),
        ];
        if let Some(image) = &c.image {
            lines.push(self.row("Image", image.clone(), Style::default().fg(self.palette.dim)));
        }
        lines
    }
}

impl Component for DetailsView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.border())
            .title(format!(" {} ", self.crypto.id))
            .padding(Padding::horizontal(1));
        let paragraph = Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
