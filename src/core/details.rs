//! # Crypto Details View Model
//!
//! Backs the details screen. Looks one coin up by id in the repository's
//! (cache-preferring) snapshot.

use std::sync::Arc;

use log::{debug, info};
use tokio::sync::mpsc;

use crate::core::crypto::{Crypto, CryptoDomain, ResponseDomain};
use crate::core::home::NO_DATA_MESSAGE;
use crate::core::state::SimpleViewModelState;
use crate::data::CryptoRepo;

pub struct CryptoDetailsViewModel {
    crypto_id: String,
    crypto_repo: Arc<dyn CryptoRepo>,
    state: SimpleViewModelState<Crypto>,
    resolutions_tx: mpsc::UnboundedSender<ResponseDomain<CryptoDomain>>,
    resolutions_rx: mpsc::UnboundedReceiver<ResponseDomain<CryptoDomain>>,
}

impl CryptoDetailsViewModel {
    /// Must be called from within a tokio runtime.
    pub fn new(crypto_id: impl Into<String>, crypto_repo: Arc<dyn CryptoRepo>) -> Self {
        let (resolutions_tx, resolutions_rx) = mpsc::unbounded_channel();
        let mut view_model = Self {
            crypto_id: crypto_id.into(),
            crypto_repo,
            state: SimpleViewModelState::Loading,
            resolutions_tx,
            resolutions_rx,
        };
        view_model.resolve();
        view_model
    }

    pub fn crypto_id(&self) -> &str {
        &self.crypto_id
    }

    pub fn state(&self) -> &SimpleViewModelState<Crypto> {
        &self.state
    }

    pub fn try_again(&mut self) {
        self.state = SimpleViewModelState::Loading;
        self.resolve();
    }

    pub fn apply_pending(&mut self) -> bool {
        let mut changed = false;
        while let Ok(response) = self.resolutions_rx.try_recv() {
            self.apply(response);
            changed = true;
        }
        changed
    }

    pub async fn wait_for_resolution(&mut self) {
        if !self.state.is_loading() {
            return;
        }
        if let Some(response) = self.resolutions_rx.recv().await {
            self.apply(response);
        }
    }

    fn resolve(&mut self) {
        let crypto_repo = Arc::clone(&self.crypto_repo);
        let tx = self.resolutions_tx.clone();
        info!("Loading details for {}", self.crypto_id);
        tokio::spawn(async move {
            let response = crypto_repo.get_cryptos().await;
            if tx.send(response).is_err() {
                debug!("Details view model dropped before fetch resolved");
            }
        });
    }

    fn apply(&mut self, response: ResponseDomain<CryptoDomain>) {
        let domain = match response {
            ResponseDomain::Success {
                domain: Some(domain),
            }
            | ResponseDomain::Error {
                domain: Some(domain),
                ..
            } => domain,
            ResponseDomain::Success { domain: None } => {
                self.state = SimpleViewModelState::Error(NO_DATA_MESSAGE.to_string());
                return;
            }
            ResponseDomain::Error {
                message,
                domain: None,
            } => {
                self.state = SimpleViewModelState::Error(message);
                return;
            }
        };

        let found = domain.cryptos.into_iter().find(|c| c.id == self.crypto_id);
        self.state = match found {
            Some(crypto) => SimpleViewModelState::Idle(crypto),
            None => SimpleViewModelState::Error(format!("Unknown coin: {}", self.crypto_id)),
        };
    }
}
