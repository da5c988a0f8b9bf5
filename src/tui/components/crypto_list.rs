//! # Crypto List Component
//!
//! Scrollable market table for the home screen.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CryptoListState` lives in `TuiState`
//! - `CryptoList` is created each frame with borrowed state and data

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::core::crypto::Crypto;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::format::{format_amount, format_percent, truncate_to_width};
use crate::tui::palette::Palette;

const PAGE: usize = 10;

/// Persistent selection state for the list.
#[derive(Default)]
pub struct CryptoListState {
    pub selected: usize,
    pub list_state: ListState,
    len: usize,
}

/// Events emitted by the list.
#[derive(Debug, PartialEq, Eq)]
pub enum ListEvent {
    Open(usize),
}

impl CryptoListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the selection inside a list of `len` items.
    pub fn sync_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.sync_len(self.len);
    }

    fn select(&mut self, index: usize) {
        if self.len == 0 {
            return;
        }
        self.selected = index.min(self.len - 1);
        self.list_state.select(Some(self.selected));
    }
}

impl EventHandler for CryptoListState {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ListEvent> {
        match event {
            TuiEvent::CursorUp => self.select(self.selected.saturating_sub(1)),
            TuiEvent::CursorDown => self.select(self.selected + 1),
            TuiEvent::PageUp => self.select(self.selected.saturating_sub(PAGE)),
            TuiEvent::PageDown => self.select(self.selected + PAGE),
            TuiEvent::Submit if self.len > 0 => return Some(ListEvent::Open(self.selected)),
            _ => {}
        }
        None
    }
}

/// Transient render wrapper for the market list.
pub struct CryptoList<'a> {
    pub state: &'a mut CryptoListState,
    pub cryptos: &'a [Crypto],
    pub palette: Palette,
}

impl Component for CryptoList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.sync_len(self.cryptos.len());

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.border())
            .title(" Markets ")
            .padding(Padding::horizontal(1));

        if self.cryptos.is_empty() {
            let empty = Paragraph::new("No coins match.")
                .style(ratatui::style::Style::default().fg(self.palette.dim))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // Layout: "  #1  Bitcoin (BTC)        64,123.45   +1.23%  "
        let inner_width = area.width.saturating_sub(4) as usize; // borders + padding
        let price_width = 16;
        let change_width = 9;
        let rank_width = 5;
        let name_width = inner_width.saturating_sub(price_width + change_width + rank_width);

        let items: Vec<ListItem> = self
            .cryptos
            .iter()
            .enumerate()
            .map(|(i, crypto)| {
                let rank = crypto
                    .market_cap_rank
                    .map(|r| format!("#{r}"))
                    .unwrap_or_default();
                let label = format!("{} ({})", crypto.name, crypto.symbol.to_uppercase());
                let name = truncate_to_width(&label, name_width);

                let base = if i == self.state.selected {
                    self.palette.selected()
                } else {
                    self.palette.base()
                };
                let change_style = if i == self.state.selected {
                    base
                } else {
                    self.palette.change(crypto.price_change_percentage_24h)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(format!("{rank:<rank_width$}"), base),
                    Span::styled(format!("{name:<name_width$}"), base),
                    Span::styled(
                        format!("{:>price_width$}", format_amount(crypto.current_price)),
                        base,
                    ),
                    Span::styled(
                        format!(
                            "{:>change_width$}",
                            format_percent(crypto.price_change_percentage_24h)
                        ),
                        change_style,
                    ),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::AppThemes;
    use crate::test_support::{crypto, render_to_text};

    #[test]
    fn test_navigation_is_clamped() {
        let mut state = CryptoListState::new();
        state.sync_len(3);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected, 0);
        state.handle_event(&TuiEvent::PageDown);
        assert_eq!(state.selected, 2);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_submit_opens_selected() {
        let mut state = CryptoListState::new();
        state.sync_len(2);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(ListEvent::Open(1))
        );
    }

    #[test]
    fn test_submit_on_empty_list_is_none() {
        let mut state = CryptoListState::new();
        state.sync_len(0);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
        assert_eq!(state.list_state.selected(), None);
    }

    #[test]
    fn test_shrinking_list_clamps_selection() {
        let mut state = CryptoListState::new();
        state.sync_len(5);
        state.handle_event(&TuiEvent::PageDown);
        state.sync_len(2);
        assert_eq!(state.selected, 1);
        state.reset();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_render_rows() {
        let mut state = CryptoListState::new();
        let mut btc = crypto("bitcoin", "Bitcoin");
        btc.symbol = "btc".into();
        btc.market_cap_rank = Some(1);
        btc.current_price = Some(64_123.45);
        btc.price_change_percentage_24h = Some(1.5);
        let cryptos = vec![btc, crypto("ethereum", "Ethereum")];

        let mut list = CryptoList {
            state: &mut state,
            cryptos: &cryptos,
            palette: Palette::for_theme(AppThemes::Dark),
        };
        let text = render_to_text(70, 6, |f| list.render(f, f.area()));

        assert!(text.contains("#1"));
        assert!(text.contains("Bitcoin (BTC)"));
        assert!(text.contains("64,123.45"));
        assert!(text.contains("+1.50%"));
        assert!(text.contains("Ethereum"));
    }

    #[test]
    fn test_render_empty() {
        let mut state = CryptoListState::new();
        let mut list = CryptoList {
            state: &mut state,
            cryptos: &[],
            palette: Palette::for_theme(AppThemes::Light),
        };
        let text = render_to_text(40, 5, |f| list.render(f, f.area()));
        assert!(text.contains("No coins match."));
    }
}
