//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.coinlist/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::theme::AppThemes;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CoinlistConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_theme: Option<AppThemes>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub vs_currency: Option<String>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CacheConfig {
    pub max_age_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_API_BASE_URL: &str = crate::data::coingecko::DEFAULT_BASE_URL;
pub const DEFAULT_VS_CURRENCY: &str = "usd";
pub const DEFAULT_PER_PAGE: u32 = 100;
/// The markets endpoint rejects larger pages.
pub const MAX_PER_PAGE: u32 = 250;
pub const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 300;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub default_theme: AppThemes,
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub vs_currency: String,
    pub per_page: u32,
    pub cache_max_age_secs: u64,
}

/// Values that came from command-line flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub vs_currency: Option<String>,
    pub theme: Option<AppThemes>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.coinlist/`.
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".coinlist"))
}

/// Returns the path to `~/.coinlist/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    data_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.coinlist/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `CoinlistConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<CoinlistConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(CoinlistConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<CoinlistConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(CoinlistConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: CoinlistConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Coinlist Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_theme = "dark"             # "light" or "dark", used until you toggle it

# [api]
# base_url = "https://api.coingecko.com/api/v3"   # Or set COINLIST_API_URL
# api_key = "CG-..."                 # Or set COINGECKO_API_KEY
# vs_currency = "usd"                # Or set COINLIST_VS_CURRENCY / --currency
# per_page = 100                     # 1-250

# [cache]
# max_age_secs = 300                 # How long a fetched list is served without refetching
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &CoinlistConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &CoinlistConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Theme: CLI → config → default
    let default_theme = cli
        .theme
        .or(config.general.default_theme)
        .unwrap_or_default();

    // Base URL: env → config → default
    let api_base_url = env("COINLIST_API_URL")
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    // API key: env → config
    let api_key = env("COINGECKO_API_KEY").or_else(|| config.api.api_key.clone());

    // Currency: CLI → env → config → default
    let vs_currency = cli
        .vs_currency
        .clone()
        .or_else(|| env("COINLIST_VS_CURRENCY"))
        .or_else(|| config.api.vs_currency.clone())
        .unwrap_or_else(|| DEFAULT_VS_CURRENCY.to_string())
        .to_lowercase();

    let per_page = config
        .api
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);

    ResolvedConfig {
        default_theme,
        api_base_url,
        api_key,
        vs_currency,
        per_page,
        cache_max_age_secs: config
            .cache
            .max_age_secs
            .unwrap_or(DEFAULT_CACHE_MAX_AGE_SECS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = CoinlistConfig::default();
        assert!(config.general.default_theme.is_none());
        assert!(config.api.base_url.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&CoinlistConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.default_theme, AppThemes::Dark);
        assert_eq!(resolved.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(resolved.api_key, None);
        assert_eq!(resolved.vs_currency, "usd");
        assert_eq!(resolved.per_page, DEFAULT_PER_PAGE);
        assert_eq!(resolved.cache_max_age_secs, DEFAULT_CACHE_MAX_AGE_SECS);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = CoinlistConfig {
            general: GeneralConfig {
                default_theme: Some(AppThemes::Light),
            },
            api: ApiConfig {
                base_url: Some("http://localhost:9000".to_string()),
                api_key: Some("CG-test".to_string()),
                vs_currency: Some("EUR".to_string()),
                per_page: Some(20),
            },
            cache: CacheConfig {
                max_age_secs: Some(60),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.default_theme, AppThemes::Light);
        assert_eq!(resolved.api_base_url, "http://localhost:9000");
        assert_eq!(resolved.api_key.as_deref(), Some("CG-test"));
        assert_eq!(resolved.vs_currency, "eur");
        assert_eq!(resolved.per_page, 20);
        assert_eq!(resolved.cache_max_age_secs, 60);
    }

    #[test]
    fn test_env_wins_over_config_and_cli_wins_over_env() {
        let config = CoinlistConfig {
            api: ApiConfig {
                base_url: Some("http://from-config".to_string()),
                vs_currency: Some("gbp".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "COINLIST_API_URL" => Some("http://from-env".to_string()),
            "COINLIST_VS_CURRENCY" => Some("jpy".to_string()),
            "COINGECKO_API_KEY" => Some("CG-env".to_string()),
            _ => None,
        };
        let cli = CliOverrides {
            vs_currency: Some("chf".to_string()),
            theme: Some(AppThemes::Light),
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.api_base_url, "http://from-env");
        assert_eq!(resolved.api_key.as_deref(), Some("CG-env"));
        assert_eq!(resolved.vs_currency, "chf");
        assert_eq!(resolved.default_theme, AppThemes::Light);
    }

    #[test]
    fn test_per_page_is_clamped() {
        let config = CoinlistConfig {
            api: ApiConfig {
                per_page: Some(10_000),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.per_page, MAX_PER_PAGE);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
default_theme = "light"

[api]
base_url = "https://pro-api.coingecko.com/api/v3"
api_key = "CG-123"
vs_currency = "eur"
per_page = 50

[cache]
max_age_secs = 120
"#;
        let config: CoinlistConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_theme, Some(AppThemes::Light));
        assert_eq!(config.api.api_key.as_deref(), Some("CG-123"));
        assert_eq!(config.api.per_page, Some(50));
        assert_eq!(config.cache.max_age_secs, Some(120));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[api]
vs_currency = "btc"
"#;
        let config: CoinlistConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.vs_currency.as_deref(), Some("btc"));
        assert!(config.api.base_url.is_none());
        assert!(config.general.default_theme.is_none());
        assert!(config.cache.max_age_secs.is_none());
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.api.base_url.is_none());

        let generated = fs::read_to_string(&path).unwrap();
        assert!(generated.starts_with("# Coinlist Configuration"));
        // Everything is commented out, so it parses to defaults
        let reparsed = load_config_from(&path).unwrap();
        assert!(reparsed.general.default_theme.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api\nbase_url = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}
