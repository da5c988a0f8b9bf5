//! # Theme Store
//!
//! Light/dark preference. The current value lives in memory so reads are
//! synchronous; writes are persisted to `~/.coinlist/theme.toml`.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AppThemes {
    Light,
    #[default]
    Dark,
}

impl AppThemes {
    pub fn label(&self) -> &'static str {
        match self {
            AppThemes::Light => "light",
            AppThemes::Dark => "dark",
        }
    }
}

#[async_trait]
pub trait ThemeRepo: Send + Sync {
    fn is_dark_mode(&self) -> bool;

    async fn set_theme(&self, theme: AppThemes);
}

#[derive(Serialize, Deserialize, Debug)]
struct ThemeFile {
    theme: AppThemes,
}

/// Returns the path to `~/.coinlist/theme.toml`.
pub fn theme_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".coinlist").join("theme.toml"))
}

pub struct FileThemeRepo {
    path: Option<PathBuf>,
    current: RwLock<AppThemes>,
}

impl FileThemeRepo {
    /// Reads the saved theme from `path`, falling back to `default` when the
    /// file is missing or unreadable.
    pub fn load(path: PathBuf, default: AppThemes) -> Self {
        let theme = match read_theme(&path) {
            Some(theme) => {
                info!("Loaded theme '{}' from {}", theme.label(), path.display());
                theme
            }
            None => default,
        };
        Self {
            path: Some(path),
            current: RwLock::new(theme),
        }
    }

    /// A store that never touches disk.
    pub fn in_memory(theme: AppThemes) -> Self {
        Self {
            path: None,
            current: RwLock::new(theme),
        }
    }

    pub fn theme(&self) -> AppThemes {
        match self.current.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

fn read_theme(path: &Path) -> Option<AppThemes> {
    if !path.exists() {
        return None;
    }
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read theme file {}: {}", path.display(), e);
            return None;
        }
    };
    match toml::from_str::<ThemeFile>(&contents) {
        Ok(file) => Some(file.theme),
        Err(e) => {
            warn!("Ignoring malformed theme file {}: {}", path.display(), e);
            None
        }
    }
}

#[async_trait]
impl ThemeRepo for FileThemeRepo {
    fn is_dark_mode(&self) -> bool {
        self.theme() == AppThemes::Dark
    }

    async fn set_theme(&self, theme: AppThemes) {
        match self.current.write() {
            Ok(mut guard) => *guard = theme,
            Err(poisoned) => *poisoned.into_inner() = theme,
        }
        debug!("Theme set to {}", theme.label());

        let Some(path) = &self.path else {
            return;
        };
        let contents = match toml::to_string(&ThemeFile { theme }) {
            Ok(c) => c,
            Err(e) => {
                warn!("Failed to serialize theme: {}", e);
                return;
            }
        };
        if let Some(parent) = path.parent()
            && let Err(e) = tokio::fs::create_dir_all(parent).await
        {
            warn!("Failed to create theme directory: {}", e);
            return;
        }
        if let Err(e) = tokio::fs::write(path, contents).await {
            warn!("Failed to persist theme to {}: {}", path.display(), e);
        }
    }
}
