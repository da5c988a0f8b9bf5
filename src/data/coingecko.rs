//! CoinGecko-compatible market data repository.
//!
//! Reads `GET /coins/markets`, whose items deserialize straight into
//! [`Crypto`], and keeps the last good snapshot in a [`CryptoCache`] for
//! stale fallback.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, Utc};
use log::{debug, info, warn};

use crate::core::config::ResolvedConfig;
use crate::core::crypto::{Crypto, CryptoDomain, ResponseDomain};
use crate::data::cache::{CachedCryptos, CryptoCache};
use crate::data::repo::{CryptoRepo, RepoError};

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
const API_KEY_HEADER: &str = "x-cg-demo-api-key";
const LAST_UPDATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct CoinGeckoRepo {
    base_url: String,
    api_key: Option<String>,
    vs_currency: String,
    per_page: u32,
    cache_max_age_secs: u64,
    request_timeout: Duration,
    cache: CryptoCache,
    client: reqwest::Client,
}

impl CoinGeckoRepo {
    /// Creates a repository against `base_url` with USD prices, 100 coins
    /// per page, a 5 minute cache and a 30 second request limit.
    pub fn new(base_url: String, cache: CryptoCache) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
            vs_currency: "usd".to_string(),
            per_page: 100,
            cache_max_age_secs: 300,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cache,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &ResolvedConfig, cache: CryptoCache) -> Self {
        Self::new(config.api_base_url.clone(), cache)
            .with_api_key(config.api_key.clone())
            .with_currency(config.vs_currency.clone())
            .with_per_page(config.per_page)
            .with_cache_max_age(config.cache_max_age_secs)
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_currency(mut self, vs_currency: String) -> Self {
        self.vs_currency = vs_currency;
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn with_cache_max_age(mut self, secs: u64) -> Self {
        self.cache_max_age_secs = secs;
        self
    }

    /// Upper bound on one markets request, body included.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Fetches the markets page from the network.
    async fn fetch_remote(&self) -> Result<CryptoDomain, RepoError> {
        let url = format!("{}/coins/markets", self.base_url);
        let per_page = self.per_page.to_string();
        let mut request = self.client.get(&url).query(&[
            ("vs_currency", self.vs_currency.as_str()),
            ("order", "market_cap_desc"),
            ("per_page", per_page.as_str()),
            ("page", "1"),
        ]);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        info!(
            "Fetching markets: url={}, vs_currency={}, per_page={}",
            url, self.vs_currency, self.per_page
        );

        let response = request
            .send()
            .await
            .map_err(|e| RepoError::Network(e.to_string()))?;

        debug!("Markets response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Markets API error: {} - {}", status, err_body);
            return Err(RepoError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RepoError::Network(e.to_string()))?;
        let cryptos: Vec<Crypto> =
            serde_json::from_str(&body).map_err(|e| RepoError::Parse(e.to_string()))?;

        info!("Fetched {} cryptos", cryptos.len());

        Ok(CryptoDomain {
            cryptos,
            last_update: Local::now().format(LAST_UPDATE_FORMAT).to_string(),
        })
    }

    /// Network read + cache write. A failed cache write is logged only.
    async fn fetch_and_store(&self) -> Result<CryptoDomain, RepoError> {
        let domain = match tokio::time::timeout(self.request_timeout, self.fetch_remote()).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    "Markets request timed out after {}s",
                    self.request_timeout.as_secs_f32()
                );
                return Err(RepoError::Network(format!(
                    "request timed out after {}s",
                    self.request_timeout.as_secs_f32()
                )));
            }
        };
        if let Err(e) = self.cache.store(&domain, Utc::now().timestamp()) {
            warn!("Failed to write cache: {}", e);
        }
        Ok(domain)
    }

    fn is_fresh(&self, cached: &CachedCryptos) -> bool {
        cached.age_secs(Utc::now().timestamp()) < self.cache_max_age_secs
    }

    fn failed(&self, error: RepoError, cached: Option<CachedCryptos>) -> ResponseDomain<CryptoDomain> {
        let stale = cached.map(|c| c.domain);
        if stale.is_some() {
            warn!("Fetch failed, falling back to cached data: {}", error);
        } else {
            warn!("Fetch failed with no cached data: {}", error);
        }
        ResponseDomain::error(error.to_string(), stale)
    }
}

#[async_trait]
impl CryptoRepo for CoinGeckoRepo {
    async fn get_cryptos(&self) -> ResponseDomain<CryptoDomain> {
        let cached = self.cache.load();
        if let Some(entry) = &cached
            && self.is_fresh(entry)
        {
            debug!("Serving cryptos from cache ({}s old)", entry.age_secs(Utc::now().timestamp()));
            return ResponseDomain::success(entry.domain.clone());
        }

        match self.fetch_and_store().await {
            Ok(domain) => ResponseDomain::success(domain),
            Err(e) => self.failed(e, cached),
        }
    }

    async fn fetch_and_cache_cryptos(&self) -> ResponseDomain<CryptoDomain> {
        match self.fetch_and_store().await {
            Ok(domain) => ResponseDomain::success(domain),
            Err(e) => {
                let cached = self.cache.load();
                self.failed(e, cached)
            }
        }
    }
}
