//! # Crypto Domain Types
//!
//! What the data layer hands to the view models. `Crypto` is an opaque,
//! immutable payload once received; the view models only ever read `id`
//! and `name` to search and navigate.

use serde::{Deserialize, Serialize};

/// One tradeable asset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Crypto {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub high_24h: Option<f64>,
    #[serde(default)]
    pub low_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

impl Crypto {
    /// Case-insensitive substring match against the display name.
    /// An empty term matches everything.
    pub fn matches(&self, search: &str) -> bool {
        self.name.to_lowercase().contains(&search.to_lowercase())
    }
}

/// A full market snapshot as returned by a repository.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CryptoDomain {
    pub cryptos: Vec<Crypto>,
    pub last_update: String,
}

/// Outcome of a repository read.
///
/// Both variants may carry a payload: on `Error` it is whatever the cache
/// still holds, so callers can fall back to stale data.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseDomain<T> {
    Success { domain: Option<T> },
    Error { message: String, domain: Option<T> },
}

impl<T> ResponseDomain<T> {
    pub fn success(domain: T) -> Self {
        ResponseDomain::Success {
            domain: Some(domain),
        }
    }

    pub fn error(message: impl Into<String>, domain: Option<T>) -> Self {
        ResponseDomain::Error {
            message: message.into(),
            domain,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseDomain::Success { .. })
    }

    pub fn domain(&self) -> Option<&T> {
        match self {
            ResponseDomain::Success { domain } | ResponseDomain::Error { domain, .. } => {
                domain.as_ref()
            }
        }
    }
}
