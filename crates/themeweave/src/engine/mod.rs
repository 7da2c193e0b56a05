//! Design-token engines.
//!
//! The manager never derives tokens itself. It hands the merged configuration
//! to a [`TokenEngine`] and republishes the allow-listed part of whatever
//! comes back. Any engine can be injected; closures implement the trait too,
//! which keeps tests free of the real derivation logic:
//!
//! ```rust
//! use serde_json::json;
//! use themeweave::engine::TokenEngine;
//! use themeweave::{ThemeConfig, TokenMap};
//!
//! let stub = |config: &ThemeConfig| -> Result<TokenMap, themeweave::EngineError> {
//!     let mut tokens = config.tokens();
//!     tokens.insert("colorBgContainer".into(), json!("#fafafa"));
//!     Ok(tokens)
//! };
//!
//! let tokens = stub.compute_tokens(&ThemeConfig::new()).unwrap();
//! assert_eq!(tokens["colorBgContainer"], json!("#fafafa"));
//! ```
//!
//! ## The built-in engine
//!
//! [`DesignTokenEngine`] works in three stages:
//!
//! 1. **Seed**: built-in seed defaults overlaid with the caller's seed-named
//!    tokens, validated (bad colors or numbers fail here).
//! 2. **Map**: the selected algorithms run left to right, `default` when
//!    none is selected. See [`Algorithm`](crate::Algorithm).
//! 3. **Alias**: every caller token is layered over the map, then alias
//!    tokens are derived from the result.
//!
//! Caller values always survive: a token the caller sets comes back unchanged.

mod alias;
mod derive;
mod seed;

use crate::algorithm::Algorithm;
use crate::config::ThemeConfig;
use crate::error::EngineError;
use crate::token::{layered, TokenMap};

pub use seed::{is_seed, seed_defaults, Seed};

/// Expands a configuration into a full computed token set.
pub trait TokenEngine {
    /// Computes every token for `config`.
    ///
    /// `config.token` already carries the merged defaults, brand colors and
    /// caller overrides.
    fn compute_tokens(&self, config: &ThemeConfig) -> Result<TokenMap, EngineError>;
}

impl<F> TokenEngine for F
where
    F: Fn(&ThemeConfig) -> Result<TokenMap, EngineError>,
{
    fn compute_tokens(&self, config: &ThemeConfig) -> Result<TokenMap, EngineError> {
        (self)(config)
    }
}

/// The built-in seed → map → alias engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesignTokenEngine;

impl DesignTokenEngine {
    /// Creates the engine.
    pub fn new() -> Self {
        DesignTokenEngine
    }
}

impl TokenEngine for DesignTokenEngine {
    fn compute_tokens(&self, config: &ThemeConfig) -> Result<TokenMap, EngineError> {
        let mut overrides = config.tokens();
        overrides.retain(|name, value| !seed::is_blank_optional(name, value));
        let seed_map = seed::seed_tokens(&overrides);
        Seed::from_tokens(&seed_map)?;

        let default = [Algorithm::Default];
        let algorithms = match config.algorithms() {
            [] => &default[..],
            selected => selected,
        };

        let mut map: Option<TokenMap> = None;
        for algorithm in algorithms {
            map = Some(derive::derive(algorithm, &seed_map, map.as_ref())?);
        }
        let map = map.unwrap_or_default();

        let mut merged = layered([&seed_map, &map, &overrides]);
        alias::apply_aliases(&mut merged, &overrides)?;

        log::trace!(
            "computed {} tokens from {} algorithm(s)",
            merged.len(),
            algorithms.len()
        );
        Ok(merged)
    }
}
