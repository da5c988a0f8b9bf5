//! # View State
//!
//! Presentation state shared by every screen's view model.
//!
//! ```text
//! SimpleViewModelState<T>
//! ├── Loading            // no payload, initial state
//! ├── Idle(T)            // data ready to render
//! └── Error(String)      // retryable failure message
//!
//! HomeDataState
//! ├── cryptos: Vec<Crypto>           // full list from the repo
//! ├── last_update: String            // repo timestamp
//! ├── filtered_cryptos: Vec<Crypto>  // derived, recomputed wholesale
//! └── is_stale: bool                 // served from cache after a failed fetch
//! ```
//!
//! Readers pattern-match on the variant; there is no payload to read
//! until a fetch has resolved into `Idle`.

use crate::core::crypto::{Crypto, CryptoDomain};

#[derive(Debug, Clone, PartialEq)]
pub enum SimpleViewModelState<T> {
    Loading,
    Idle(T),
    Error(String),
}

impl<T> SimpleViewModelState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, SimpleViewModelState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            SimpleViewModelState::Idle(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            SimpleViewModelState::Idle(data) => Some(data),
            _ => None,
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            SimpleViewModelState::Loading => "loading",
            SimpleViewModelState::Idle(_) => "idle",
            SimpleViewModelState::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeDataState {
    pub cryptos: Vec<Crypto>,
    pub last_update: String,
    pub filtered_cryptos: Vec<Crypto>,
    pub is_stale: bool,
}

impl HomeDataState {
    pub fn new(domain: CryptoDomain, is_stale: bool) -> Self {
        Self {
            cryptos: domain.cryptos,
            last_update: domain.last_update,
            filtered_cryptos: Vec::new(),
            is_stale,
        }
    }

    /// Rebuilds `filtered_cryptos` from scratch for `search`.
    pub fn apply_search(&mut self, search: &str) {
        self.filtered_cryptos = self
            .cryptos
            .iter()
            .filter(|c| c.matches(search))
            .cloned()
            .collect();
    }

    /// The list a screen should show for the given search term.
    pub fn visible(&self, search: &str) -> &[Crypto] {
        if search.is_empty() {
            &self.cryptos
        } else {
            &self.filtered_cryptos
        }
    }
}
