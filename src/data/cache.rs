//! # Crypto Cache
//!
//! Keeps the last successful market snapshot on disk at
//! `~/.coinlist/cache.json` so a failed fetch can still show something.
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`) for crash safety.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::crypto::CryptoDomain;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CachedCryptos {
    /// Unix timestamp (seconds) of the fetch that produced `domain`.
    pub fetched_at: i64,
    pub domain: CryptoDomain,
}

impl CachedCryptos {
    /// Age in seconds relative to `now`. Entries from the future count as fresh.
    pub fn age_secs(&self, now: i64) -> u64 {
        now.saturating_sub(self.fetched_at).max(0) as u64
    }
}

/// Returns `~/.coinlist/cache.json`.
pub fn default_cache_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".coinlist").join("cache.json"))
}

pub struct CryptoCache {
    path: PathBuf,
}

impl CryptoCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cached snapshot. A missing or corrupt file reads as `None`.
    pub fn load(&self) -> Option<CachedCryptos> {
        if !self.path.exists() {
            return None;
        }
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to read cache {}: {}", self.path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(cached) => Some(cached),
            Err(e) => {
                warn!("Ignoring corrupt cache {}: {}", self.path.display(), e);
                None
            }
        }
    }

    pub fn store(&self, domain: &CryptoDomain, fetched_at: i64) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let cached = CachedCryptos {
            fetched_at,
            domain: domain.clone(),
        };
        atomic_write_json(&self.path, &cached)?;
        debug!(
            "Cached {} cryptos at {}",
            domain.cryptos.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
