//! # Routes
//!
//! Static route descriptors. A route is addressed by a plain string
//! (`"home"`, `"crypto_details/bitcoin"`) so producers of navigation
//! commands never depend on screen types.

pub const HOME_ROUTE: &str = "home";

/// Template for the details screen; `{cryptoId}` is the single argument.
pub const CRYPTO_DETAILS_ROUTE: &str = "crypto_details/{cryptoId}";

pub const CRYPTO_ID_ARG: &str = "cryptoId";

const CRYPTO_DETAILS_PREFIX: &str = "crypto_details/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    String,
}

/// Declared argument of a route template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteArgument {
    pub name: &'static str,
    pub kind: ArgumentKind,
}

pub const CRYPTO_DETAILS_ARGUMENTS: &[RouteArgument] = &[RouteArgument {
    name: CRYPTO_ID_ARG,
    kind: ArgumentKind::String,
}];

/// Concrete route string for the details screen of `crypto_id`.
pub fn go_to_crypto(crypto_id: &str) -> String {
    format!("{CRYPTO_DETAILS_PREFIX}{crypto_id}")
}

/// A resolved destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    CryptoDetails { crypto_id: String },
}

impl Route {
    /// Parses a concrete route string against the declared templates.
    pub fn resolve(route: &str) -> Option<Route> {
        if route == HOME_ROUTE {
            return Some(Route::Home);
        }
        let crypto_id = route.strip_prefix(CRYPTO_DETAILS_PREFIX)?;
        if crypto_id.is_empty() || crypto_id.contains('/') {
            return None;
        }
        Some(Route::CryptoDetails {
            crypto_id: crypto_id.to_string(),
        })
    }

    /// The template this route was declared with.
    pub fn template(&self) -> &'static str {
        match self {
            Route::Home => HOME_ROUTE,
            Route::CryptoDetails { .. } => CRYPTO_DETAILS_ROUTE,
        }
    }

    pub fn arguments(&self) -> &'static [RouteArgument] {
        match self {
            Route::Home => &[],
            Route::CryptoDetails { .. } => CRYPTO_DETAILS_ARGUMENTS,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => HOME_ROUTE.to_string(),
            Route::CryptoDetails { crypto_id } => go_to_crypto(crypto_id),
        }
    }
}
