//! # TitleBar Component
//!
//! Top status bar: app name, quote currency, last update time and theme.
//!
//! Stateless: every field is a prop handed in by the draw pass.
//!
//! 1. **Fresh data**: `"Coinlist (usd) | updated 2024-05-01 12:00:00 | dark"`
//! 2. **Stale data**: `"... | updated 2024-05-01 12:00:00 (offline) | dark"`
//! 3. **No data yet**: `"Coinlist (usd) | Loading... | dark"`

use crate::tui::component::Component;
use crate::tui::palette::Palette;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub vs_currency: String,
    /// `None` while nothing has been loaded.
    pub last_update: Option<String>,
    pub is_stale: bool,
    pub status_message: String,
    pub dark_mode: bool,
    pub palette: Palette,
}

impl TitleBar {
    pub fn text(&self) -> String {
        let mut text = format!("Coinlist ({})", self.vs_currency);
        match &self.last_update {
            Some(update) if self.is_stale => {
                text.push_str(&format!(" | updated {update} (offline)"));
            }
            Some(update) => text.push_str(&format!(" | updated {update}")),
            None => {}
        }
        if !self.status_message.is_empty() {
            text.push_str(&format!(" | {}", self.status_message));
        }
        text.push_str(if self.dark_mode { " | dark" } else { " | light" });
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = if self.is_stale {
            self.palette.title().fg(self.palette.warning)
        } else {
            self.palette.title()
        };
        frame.render_widget(Line::from(Span::styled(self.text(), style)), area);
    }
}
