//! # Home View Model
//!
//! Owns the home screen's presentation state and turns user intents into
//! fetches, theme writes and navigation commands.
//!
//! ```text
//!            new()                    try_again() / on_tap_refresh()
//!              │                                  │
//!              ▼                                  ▼
//!          ┌────────┐   fetch ok / stale    ┌──────────┐
//!          │Loading │──────────────────────▶│Idle(data)│
//!          └────────┘                       └──────────┘
//!              │ fetch failed, no data           ▲
//!              ▼                                 │
//!          ┌──────────┐     try_again()          │
//!          │Error(msg)│──────▶ Loading ──────────┘
//!          └──────────┘
//! ```
//!
//! Fetches run on tokio tasks. Their results come back over a channel and
//! are applied by the owner via [`HomeViewModel::apply_pending`], so the
//! state is only ever written from the owner's context.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc;

use crate::core::crypto::{Crypto, CryptoDomain, ResponseDomain};
use crate::core::navigation::NavigationRepo;
use crate::core::routes::go_to_crypto;
use crate::core::state::{HomeDataState, SimpleViewModelState};
use crate::core::theme::{AppThemes, ThemeRepo};
use crate::data::CryptoRepo;

/// Which repository read a refresh uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetch {
    /// `get_cryptos`: cache first, network if needed.
    Cached,
    /// `fetch_and_cache_cryptos`: always network.
    Forced,
}

pub const NO_DATA_MESSAGE: &str = "No data received";

struct Resolution {
    generation: u64,
    response: ResponseDomain<CryptoDomain>,
}

pub struct HomeViewModel {
    crypto_repo: Arc<dyn CryptoRepo>,
    theme_repo: Arc<dyn ThemeRepo>,
    navigation: NavigationRepo,
    state: SimpleViewModelState<HomeDataState>,
    search_value: String,
    /// Bumped per fetch; results tagged with an older value are dropped.
    generation: u64,
    resolutions_tx: mpsc::UnboundedSender<Resolution>,
    resolutions_rx: mpsc::UnboundedReceiver<Resolution>,
}

impl HomeViewModel {
    /// Builds the view model and starts the initial fetch.
    /// Must be called from within a tokio runtime.
    pub fn new(
        crypto_repo: Arc<dyn CryptoRepo>,
        theme_repo: Arc<dyn ThemeRepo>,
        navigation: NavigationRepo,
    ) -> Self {
        let (resolutions_tx, resolutions_rx) = mpsc::unbounded_channel();
        let mut view_model = Self {
            crypto_repo,
            theme_repo,
            navigation,
            state: SimpleViewModelState::Loading,
            search_value: String::new(),
            generation: 0,
            resolutions_tx,
            resolutions_rx,
        };
        view_model.resolve_cryptos(Fetch::Cached);
        view_model
    }

    pub fn state(&self) -> &SimpleViewModelState<HomeDataState> {
        &self.state
    }

    /// Filtered list while a search is active, full list otherwise.
    /// `None` until a fetch has reached `Idle`.
    pub fn get_cryptos(&self) -> Option<&[Crypto]> {
        self.state
            .data()
            .map(|data| data.visible(&self.search_value))
    }

    pub fn get_last_update(&self) -> Option<&str> {
        self.state.data().map(|data| data.last_update.as_str())
    }

    pub fn search_value(&self) -> &str {
        &self.search_value
    }

    /// Stores the term and rebuilds the filtered list. The state variant
    /// does not change.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search_value = search.into();
        if let Some(data) = self.state.data_mut() {
            data.apply_search(&self.search_value);
        }
    }

    pub fn is_dark_theme(&self) -> bool {
        self.theme_repo.is_dark_mode()
    }

    /// Inverted on purpose: `true` asks for `Light`, `false` for `Dark`.
    /// Passing the current mode therefore toggles it.
    pub fn set_dark_mode(&self, dark_mode: bool) {
        let theme = if dark_mode {
            AppThemes::Light
        } else {
            AppThemes::Dark
        };
        let theme_repo = Arc::clone(&self.theme_repo);
        tokio::spawn(async move {
            theme_repo.set_theme(theme).await;
        });
    }

    pub fn go_to_details(&self, crypto_id: &str) {
        let navigation = self.navigation.clone();
        let route = go_to_crypto(crypto_id);
        tokio::spawn(async move {
            navigation.go_to(route).await;
        });
    }

    pub fn try_again(&mut self) {
        self.set_state(SimpleViewModelState::Loading);
        self.resolve_cryptos(Fetch::Cached);
    }

    pub fn on_tap_refresh(&mut self) {
        self.set_state(SimpleViewModelState::Loading);
        self.resolve_cryptos(Fetch::Forced);
    }

    /// Runs `fetch` on a background task. The outcome is applied by
    /// `apply_pending` or `wait_for_resolution`.
    pub fn resolve_cryptos(&mut self, fetch: Fetch) {
        self.generation += 1;
        let generation = self.generation;
        let crypto_repo = Arc::clone(&self.crypto_repo);
        let tx = self.resolutions_tx.clone();

        info!("Resolving cryptos: {:?} (generation {})", fetch, generation);
        tokio::spawn(async move {
            let response = match fetch {
                Fetch::Cached => crypto_repo.get_cryptos().await,
                Fetch::Forced => crypto_repo.fetch_and_cache_cryptos().await,
            };
            if tx.send(Resolution { generation, response }).is_err() {
                debug!("Home view model dropped before fetch {} resolved", generation);
            }
        });
    }

    /// Applies every finished fetch without waiting. Returns true if the
    /// state changed.
    pub fn apply_pending(&mut self) -> bool {
        let mut changed = false;
        while let Ok(resolution) = self.resolutions_rx.try_recv() {
            changed |= self.apply(resolution);
        }
        changed
    }

    /// Waits until the current fetch resolves and applies it. Returns
    /// immediately when nothing is loading.
    pub async fn wait_for_resolution(&mut self) {
        while self.state.is_loading() {
            match self.resolutions_rx.recv().await {
                Some(resolution) => {
                    self.apply(resolution);
                }
                None => return,
            }
        }
    }

    fn apply(&mut self, resolution: Resolution) -> bool {
        if resolution.generation != self.generation {
            debug!(
                "Discarding superseded fetch {} (current {})",
                resolution.generation, self.generation
            );
            return false;
        }

        match resolution.response {
            ResponseDomain::Success {
                domain: Some(domain),
            } => self.set_cryptos(domain, false),
            ResponseDomain::Success { domain: None } => {
                warn!("Fetch succeeded without data");
                self.set_state(SimpleViewModelState::Error(NO_DATA_MESSAGE.to_string()));
            }
            ResponseDomain::Error {
                message,
                domain: Some(domain),
            } => {
                info!("Showing cached cryptos after failed fetch: {}", message);
                self.set_cryptos(domain, true);
            }
            ResponseDomain::Error {
                message,
                domain: None,
            } => self.set_state(SimpleViewModelState::Error(message)),
        }
        true
    }

    fn set_cryptos(&mut self, domain: CryptoDomain, is_stale: bool) {
        let mut data = HomeDataState::new(domain, is_stale);
        if !self.search_value.is_empty() {
            data.apply_search(&self.search_value);
        }
        self.set_state(SimpleViewModelState::Idle(data));
    }

    fn set_state(&mut self, state: SimpleViewModelState<HomeDataState>) {
        debug!("Home state: {} -> {}", self.state.label(), state.label());
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::FileThemeRepo;
    use crate::test_support::{ScriptedCryptoRepo, btc_eth_domain, crypto};

    fn view_model(repo: &Arc<ScriptedCryptoRepo>) -> HomeViewModel {
        let (navigation, _commands) = NavigationRepo::channel();
        HomeViewModel::new(
            repo.clone(),
            Arc::new(FileThemeRepo::in_memory(AppThemes::Dark)),
            navigation,
        )
    }

    async fn yield_until(mut done: impl FnMut() -> bool) {
        for _ in 0..100 {
            if done() {
                return;
            }
            tokio::task::yield_now().await;
        }
    }

    fn names(cryptos: &[Crypto]) -> Vec<&str> {
        cryptos.iter().map(|c| c.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_construction_fetches_once_from_cache_path() {
        let repo = Arc::new(ScriptedCryptoRepo::new().on_get(ResponseDomain::success(btc_eth_domain("t1"))));
        let mut vm = view_model(&repo);
        assert!(vm.state().is_loading());

        vm.wait_for_resolution().await;

        assert_eq!(repo.cached_calls(), 1);
        assert_eq!(repo.forced_calls(), 0);
    }

    #[tokio::test]
    async fn test_example_scenario() {
        let repo = Arc::new(
            ScriptedCryptoRepo::new()
                .on_get(ResponseDomain::success(btc_eth_domain("t1")))
                .on_fetch(ResponseDomain::error("timeout", None)),
        );
        let mut vm = view_model(&repo);
        vm.wait_for_resolution().await;

        let expected = HomeDataState {
            cryptos: btc_eth_domain("t1").cryptos,
            last_update: "t1".to_string(),
            filtered_cryptos: vec![],
            is_stale: false,
        };
        assert_eq!(vm.state(), &SimpleViewModelState::Idle(expected));

        vm.set_search("et");
        assert_eq!(names(vm.get_cryptos().unwrap()), vec!["Ethereum"]);

        vm.on_tap_refresh();
        assert!(vm.state().is_loading());
        vm.wait_for_resolution().await;

        assert_eq!(vm.state(), &SimpleViewModelState::Error("timeout".to_string()));
        assert_eq!(repo.forced_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_with_cached_data_goes_idle() {
        let repo = Arc::new(
            ScriptedCryptoRepo::new().on_get(ResponseDomain::error("offline", Some(btc_eth_domain("t0")))),
        );
        let mut vm = view_model(&repo);
        vm.wait_for_resolution().await;

        let data = vm.state().data().unwrap();
        assert_eq!(data.last_update, "t0");
        assert!(data.is_stale);
        assert_eq!(vm.get_cryptos().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failure_without_data_is_error_with_message() {
        let repo = Arc::new(ScriptedCryptoRepo::new().on_get(ResponseDomain::error("HTTP 500", None)));
        let mut vm = view_model(&repo);
        vm.wait_for_resolution().await;

        assert_eq!(vm.state(), &SimpleViewModelState::Error("HTTP 500".to_string()));
        assert_eq!(vm.get_cryptos(), None);
        assert_eq!(vm.get_last_update(), None);
    }

    #[tokio::test]
    async fn test_success_without_domain_is_error() {
        let repo = Arc::new(ScriptedCryptoRepo::new().on_get(ResponseDomain::Success { domain: None }));
        let mut vm = view_model(&repo);
        vm.wait_for_resolution().await;

        assert_eq!(vm.state(), &SimpleViewModelState::Error(NO_DATA_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_refreshes_enter_loading_before_fetch_resolves() {
        let repo = Arc::new(ScriptedCryptoRepo::gated());
        repo.push_get(ResponseDomain::success(btc_eth_domain("t1")));
        let mut vm = view_model(&repo);
        repo.release(1);
        vm.wait_for_resolution().await;
        assert!(vm.state().data().is_some());

        repo.push_get(ResponseDomain::success(btc_eth_domain("t2")));
        vm.try_again();
        assert!(vm.state().is_loading());
        tokio::task::yield_now().await;
        assert!(!vm.apply_pending());
        assert!(vm.state().is_loading());
        repo.release(1);
        vm.wait_for_resolution().await;
        assert_eq!(vm.get_last_update(), Some("t2"));
        assert_eq!(repo.cached_calls(), 2);

        repo.push_fetch(ResponseDomain::success(btc_eth_domain("t3")));
        vm.on_tap_refresh();
        assert!(vm.state().is_loading());
        repo.release(1);
        vm.wait_for_resolution().await;
        assert_eq!(vm.get_last_update(), Some("t3"));
        assert_eq!(repo.forced_calls(), 1);
    }

    #[tokio::test]
    async fn test_superseded_fetch_is_discarded() {
        let repo = Arc::new(ScriptedCryptoRepo::gated());
        repo.push_get(ResponseDomain::success(btc_eth_domain("initial")));
        repo.push_fetch(ResponseDomain::success(btc_eth_domain("refreshed")));

        let mut vm = view_model(&repo);
        vm.on_tap_refresh();
        repo.release(2);
        vm.wait_for_resolution().await;
        // The initial fetch may land after the refresh; it must not win
        tokio::task::yield_now().await;
        vm.apply_pending();

        assert_eq!(vm.get_last_update(), Some("refreshed"));
    }

    #[tokio::test]
    async fn test_get_cryptos_is_none_while_loading() {
        let repo = Arc::new(ScriptedCryptoRepo::gated());
        let vm = view_model(&repo);
        assert_eq!(vm.get_cryptos(), None);
        assert_eq!(vm.get_last_update(), None);
    }

    #[tokio::test]
    async fn test_search_filters_case_insensitively_for_any_term() {
        let domain = CryptoDomain {
            cryptos: vec![
                crypto("bitcoin", "Bitcoin"),
                crypto("ethereum", "Ethereum"),
                crypto("ethereum-classic", "Ethereum Classic"),
                crypto("tether", "Tether"),
            ],
            last_update: "t".to_string(),
        };
        let repo = Arc::new(ScriptedCryptoRepo::new().on_get(ResponseDomain::success(domain.clone())));
        let mut vm = view_model(&repo);
        vm.wait_for_resolution().await;

        for term in ["", "e", "ET", "ether", "CLASSIC", "coin", "zzz", "t"] {
            vm.set_search(term);
            let expected: Vec<&str> = domain
                .cryptos
                .iter()
                .filter(|c| c.name.to_lowercase().contains(&term.to_lowercase()))
                .map(|c| c.name.as_str())
                .collect();
            assert_eq!(names(vm.get_cryptos().unwrap()), expected, "term {term:?}");

            let data = vm.state().data().unwrap();
            assert!(data.filtered_cryptos.iter().all(|c| data.cryptos.contains(c)));
            if term.is_empty() {
                assert_eq!(data.filtered_cryptos, data.cryptos);
            }
        }
    }

    #[tokio::test]
    async fn test_get_cryptos_tracks_latest_search() {
        let repo = Arc::new(ScriptedCryptoRepo::new().on_get(ResponseDomain::success(btc_eth_domain("t1"))));
        let mut vm = view_model(&repo);
        vm.wait_for_resolution().await;

        vm.set_search("bit");
        vm.set_search("");
        assert_eq!(vm.get_cryptos().unwrap().len(), 2);
        vm.set_search("ETH");
        assert_eq!(names(vm.get_cryptos().unwrap()), vec!["Ethereum"]);
        assert!(matches!(vm.state(), SimpleViewModelState::Idle(_)));
    }

    #[tokio::test]
    async fn test_active_search_is_reapplied_to_new_data() {
        let repo = Arc::new(
            ScriptedCryptoRepo::new()
                .on_get(ResponseDomain::success(btc_eth_domain("t1")))
                .on_fetch(ResponseDomain::success(btc_eth_domain("t2"))),
        );
        let mut vm = view_model(&repo);
        vm.set_search("bit");
        vm.wait_for_resolution().await;
        assert_eq!(names(vm.get_cryptos().unwrap()), vec!["Bitcoin"]);

        vm.on_tap_refresh();
        vm.wait_for_resolution().await;
        assert_eq!(names(vm.get_cryptos().unwrap()), vec!["Bitcoin"]);
        assert_eq!(vm.search_value(), "bit");
    }

    #[tokio::test]
    async fn test_set_dark_mode_is_inverted() {
        let repo = Arc::new(ScriptedCryptoRepo::gated());
        let vm = view_model(&repo);
        assert!(vm.is_dark_theme());

        vm.set_dark_mode(true);
        yield_until(|| !vm.is_dark_theme()).await;
        assert!(!vm.is_dark_theme());

        vm.set_dark_mode(false);
        yield_until(|| vm.is_dark_theme()).await;
        assert!(vm.is_dark_theme());
    }

    #[tokio::test]
    async fn test_go_to_details_emits_route() {
        let repo = Arc::new(ScriptedCryptoRepo::gated());
        let (navigation, mut commands) = NavigationRepo::channel();
        let vm = HomeViewModel::new(
            repo.clone(),
            Arc::new(FileThemeRepo::in_memory(AppThemes::Dark)),
            navigation,
        );

        vm.go_to_details("bitcoin");

        let command = commands.next().await.unwrap();
        assert_eq!(command.route, "crypto_details/bitcoin");
    }

    #[tokio::test]
    async fn test_wait_for_resolution_returns_when_not_loading() {
        let repo = Arc::new(ScriptedCryptoRepo::new().on_get(ResponseDomain::error("x", None)));
        let mut vm = view_model(&repo);
        vm.wait_for_resolution().await;
        // Already in Error: must not block
        vm.wait_for_resolution().await;
        assert_eq!(vm.state().label(), "error");
    }
}
