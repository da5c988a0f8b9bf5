//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the screens,
//! and translates keyboard events into view model calls.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events, finished
//!   fetches, navigation or a theme change.
//!
//! ## Navigation
//!
//! View models never touch the screen stack. They emit route strings on the
//! navigation channel; each tick the [`Router`] forwards the latest one to
//! the [`NavController`], and the loop builds or drops the details view
//! model to match the visible route.

mod component;
pub mod components;
mod event;
mod format;
mod palette;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::config::ResolvedConfig;
use crate::core::details::CryptoDetailsViewModel;
use crate::core::home::HomeViewModel;
use crate::core::navigation::NavigationRepo;
use crate::core::router::{NavController, Router};
use crate::core::routes::Route;
use crate::core::state::SimpleViewModelState;
use crate::core::theme::{FileThemeRepo, ThemeRepo, theme_path};
use crate::data::cache::default_cache_path;
use crate::data::{CoinGeckoRepo, CryptoCache, CryptoRepo};
use crate::tui::component::EventHandler;
use crate::tui::components::{CryptoListState, ListEvent, SearchChanged, SearchInput};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of the view models)
pub struct TuiState {
    pub crypto_list: CryptoListState,
    pub search_input: SearchInput,
    pub vs_currency: String,
}

impl TuiState {
    pub fn new(vs_currency: String) -> Self {
        Self {
            crypto_list: CryptoListState::new(),
            search_input: SearchInput::new(""),
            vs_currency,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste, Hide)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Show
        );
    }
}

/// Build the market data repository for a resolved config.
pub fn build_repo(config: &ResolvedConfig) -> Arc<dyn CryptoRepo> {
    let cache_path = default_cache_path().unwrap_or_else(|| PathBuf::from("coinlist-cache.json"));
    info!("Using cache file {}", cache_path.display());
    Arc::new(CoinGeckoRepo::from_config(config, CryptoCache::new(cache_path)))
}

fn build_theme_repo(config: &ResolvedConfig) -> Arc<dyn ThemeRepo> {
    match theme_path() {
        Some(path) => Arc::new(FileThemeRepo::load(path, config.default_theme)),
        None => Arc::new(FileThemeRepo::in_memory(config.default_theme)),
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let crypto_repo = build_repo(&config);
    let (navigation, commands) = NavigationRepo::channel();
    let mut router = Router::new(commands, NavController::default());
    let mut home = HomeViewModel::new(
        Arc::clone(&crypto_repo),
        build_theme_repo(&config),
        navigation,
    );
    let mut details: Option<CryptoDetailsViewModel> = None;
    let mut tui = TuiState::new(config.vs_currency.clone());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut dark_mode = home.is_dark_theme();

    loop {
        let animating = home.state().is_loading()
            || details
                .as_ref()
                .is_some_and(|d| d.state().is_loading());

        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            let route = router.navigator().current().clone();
            terminal.draw(|f| ui::draw_ui(f, &route, &home, details.as_ref(), &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => continue,
                TuiEvent::ForceQuit => {
                    should_quit = true;
                    break;
                }
                // Passing the current mode flips it
                TuiEvent::ToggleTheme => {
                    home.set_dark_mode(home.is_dark_theme());
                    continue;
                }
                _ => {}
            }

            let on_home = matches!(router.navigator().current(), Route::Home);
            if on_home {
                if handle_home_event(&event, &mut home, &mut tui) {
                    should_quit = true;
                    break;
                }
            } else if handle_details_event(&event, details.as_mut())
                && router.navigator_mut().pop_back()
            {
                debug!("Back to {}", router.navigator().current().path());
                sync_details(router.navigator().current(), &mut details, &crypto_repo);
            }
        }

        if should_quit {
            break;
        }

        // Navigation requested by view models
        if router.dispatch_pending() {
            sync_details(router.navigator().current(), &mut details, &crypto_repo);
            needs_redraw = true;
        }

        // Finished fetches
        if home.apply_pending() {
            tui.crypto_list.sync_len(home.get_cryptos().map_or(0, <[_]>::len));
            needs_redraw = true;
        }
        if let Some(details) = details.as_mut()
            && details.apply_pending()
        {
            needs_redraw = true;
        }

        // Theme writes land asynchronously
        let current_dark_mode = home.is_dark_theme();
        if current_dark_mode != dark_mode {
            dark_mode = current_dark_mode;
            needs_redraw = true;
        }
    }

    info!("Coinlist shutting down");
    ratatui::restore();
    Ok(())
}

/// Home screen key handling. Returns true when the app should quit.
fn handle_home_event(event: &TuiEvent, home: &mut HomeViewModel, tui: &mut TuiState) -> bool {
    let in_error = matches!(home.state(), SimpleViewModelState::Error(_));
    match event {
        TuiEvent::Escape => return true,
        TuiEvent::Refresh => home.on_tap_refresh(),
        TuiEvent::Submit | TuiEvent::InputChar('r') if in_error => home.try_again(),
        TuiEvent::CursorUp
        | TuiEvent::CursorDown
        | TuiEvent::PageUp
        | TuiEvent::PageDown
        | TuiEvent::Submit => {
            if let Some(ListEvent::Open(index)) = tui.crypto_list.handle_event(event) {
                let crypto_id = home
                    .get_cryptos()
                    .and_then(|cryptos| cryptos.get(index))
                    .map(|crypto| crypto.id.clone());
                if let Some(crypto_id) = crypto_id {
                    info!("Opening details for {}", crypto_id);
                    home.go_to_details(&crypto_id);
                }
            }
        }
        _ => {
            if let Some(SearchChanged(term)) = tui.search_input.handle_event(event) {
                home.set_search(term);
                tui.crypto_list.sync_len(home.get_cryptos().map_or(0, <[_]>::len));
                tui.crypto_list.reset();
            }
        }
    }
    false
}

/// Details screen key handling. Returns true when the screen should close.
fn handle_details_event(event: &TuiEvent, details: Option<&mut CryptoDetailsViewModel>) -> bool {
    match event {
        TuiEvent::Escape | TuiEvent::Backspace => true,
        TuiEvent::InputChar('r') | TuiEvent::Refresh => {
            if let Some(details) = details
                && matches!(details.state(), SimpleViewModelState::Error(_))
            {
                details.try_again();
            }
            false
        }
        _ => false,
    }
}

/// Keeps the details view model in step with the visible route.
fn sync_details(
    route: &Route,
    details: &mut Option<CryptoDetailsViewModel>,
    crypto_repo: &Arc<dyn CryptoRepo>,
) {
    match route {
        Route::CryptoDetails { crypto_id } => {
            if details.as_ref().map(CryptoDetailsViewModel::crypto_id) != Some(crypto_id.as_str()) {
                *details = Some(CryptoDetailsViewModel::new(
                    crypto_id.clone(),
                    Arc::clone(crypto_repo),
                ));
            }
        }
        Route::Home => *details = None,
    }
}
