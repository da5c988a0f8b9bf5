use std::fmt;

use async_trait::async_trait;

use crate::core::crypto::{CryptoDomain, ResponseDomain};

/// Errors that can occur while fetching market data.
/// They never escape a repository; they become the `message` of a
/// `ResponseDomain::Error`.
#[derive(Debug)]
pub enum RepoError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success status.
    Api { status: u16, message: String },
    /// Failed to parse the API response.
    Parse(String),
}

impl fmt::Display for RepoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoError::Network(msg) => write!(f, "network error: {msg}"),
            RepoError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            RepoError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for RepoError {}

/// Source of crypto market snapshots.
#[async_trait]
pub trait CryptoRepo: Send + Sync {
    /// Cache-preferring read. Goes to the network only when the cache is
    /// missing or too old.
    async fn get_cryptos(&self) -> ResponseDomain<CryptoDomain>;

    /// Forced network read that refreshes the cache.
    async fn fetch_and_cache_cryptos(&self) -> ResponseDomain<CryptoDomain>;
}
