//! # Core Application Logic
//!
//! This module contains Coinlist's presentation logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌──────────────────────────┐
//!                    │          CORE            │
//!                    │   (this module)          │
//!                    │                          │
//!                    │  • View models (state)   │
//!                    │  • Navigation commands   │
//!                    │  • Router                │
//!                    │                          │
//!                    │  No rendering.           │
//!                    └────────────┬─────────────┘
//!                                 │
//!            ┌────────────────────┼────────────────────┐
//!            ▼                    ▼                    ▼
//!     ┌────────────┐       ┌────────────┐       ┌────────────┐
//!     │    TUI     │       │    data    │       │   theme    │
//!     │  Adapter   │       │ CryptoRepo │       │  ThemeRepo │
//!     │ (ratatui)  │       │ (reqwest)  │       │  (toml)    │
//!     └────────────┘       └────────────┘       └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`home`]: `HomeViewModel`, the Loading/Idle/Error machine for the list
//! - [`details`]: `CryptoDetailsViewModel` for a single coin
//! - [`navigation`]: the single-slot navigation command channel
//! - [`router`]: consumes navigation commands and drives a `Navigator`
//! - [`routes`]: route templates and route-string parsing

pub mod config;
pub mod crypto;
pub mod details;
pub mod home;
pub mod navigation;
pub mod router;
pub mod routes;
pub mod state;
pub mod theme;
