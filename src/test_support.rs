//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::core::crypto::{Crypto, CryptoDomain, ResponseDomain};
use crate::data::CryptoRepo;

pub fn crypto(id: &str, name: &str) -> Crypto {
    Crypto {
        id: id.to_string(),
        symbol: id.chars().take(3).collect(),
        name: name.to_string(),
        image: None,
        current_price: Some(1.0),
        market_cap: None,
        market_cap_rank: None,
        total_volume: None,
        high_24h: None,
        low_24h: None,
        price_change_percentage_24h: None,
    }
}

/// `[Bitcoin, Ethereum]` stamped with `last_update`.
pub fn btc_eth_domain(last_update: &str) -> CryptoDomain {
    CryptoDomain {
        cryptos: vec![crypto("bitcoin", "Bitcoin"), crypto("ethereum", "Ethereum")],
        last_update: last_update.to_string(),
    }
}

/// A repo that replays queued responses and counts calls.
///
/// When gated, every fetch waits for [`ScriptedCryptoRepo::release`].
pub struct ScriptedCryptoRepo {
    cached: Mutex<VecDeque<ResponseDomain<CryptoDomain>>>,
    forced: Mutex<VecDeque<ResponseDomain<CryptoDomain>>>,
    gate: Option<Semaphore>,
    pub cached_calls: AtomicUsize,
    pub forced_calls: AtomicUsize,
}

impl ScriptedCryptoRepo {
    pub fn new() -> Self {
        Self {
            cached: Mutex::new(VecDeque::new()),
            forced: Mutex::new(VecDeque::new()),
            gate: None,
            cached_calls: AtomicUsize::new(0),
            forced_calls: AtomicUsize::new(0),
        }
    }

    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new()
        }
    }

    /// Queue a response for `get_cryptos`.
    pub fn on_get(self, response: ResponseDomain<CryptoDomain>) -> Self {
        self.cached.lock().unwrap().push_back(response);
        self
    }

    /// Queue a response for `fetch_and_cache_cryptos`.
    pub fn on_fetch(self, response: ResponseDomain<CryptoDomain>) -> Self {
        self.forced.lock().unwrap().push_back(response);
        self
    }

    pub fn push_get(&self, response: ResponseDomain<CryptoDomain>) {
        self.cached.lock().unwrap().push_back(response);
    }

    pub fn push_fetch(&self, response: ResponseDomain<CryptoDomain>) {
        self.forced.lock().unwrap().push_back(response);
    }

    /// Lets `n` gated fetches complete.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn cached_calls(&self) -> usize {
        self.cached_calls.load(Ordering::SeqCst)
    }

    pub fn forced_calls(&self) -> usize {
        self.forced_calls.load(Ordering::SeqCst)
    }

    async fn pass_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
    }

    fn pop(queue: &Mutex<VecDeque<ResponseDomain<CryptoDomain>>>) -> ResponseDomain<CryptoDomain> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ResponseDomain::error("no scripted response", None))
    }
}

#[async_trait]
impl CryptoRepo for ScriptedCryptoRepo {
    async fn get_cryptos(&self) -> ResponseDomain<CryptoDomain> {
        self.cached_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate().await;
        Self::pop(&self.cached)
    }

    async fn fetch_and_cache_cryptos(&self) -> ResponseDomain<CryptoDomain> {
        self.forced_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate().await;
        Self::pop(&self.forced)
    }
}

/// Renders into a `TestBackend` and returns the buffer as one string.
pub fn render_to_text(
    width: u16,
    height: u16,
    draw: impl FnOnce(&mut ratatui::Frame),
) -> String {
    let backend = ratatui::backend::TestBackend::new(width, height);
    let mut terminal = ratatui::Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect::<String>()
}
