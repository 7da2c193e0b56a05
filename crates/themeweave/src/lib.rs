//! # Themeweave - Runtime Theme Resolution
//!
//! `themeweave` merges brand color tokens, a design-token derivation algorithm
//! and application defaults into a single resolved theme, then republishes
//! that theme to presentation code through a provider.
//!
//! ## Core Concepts
//!
//! - [`ThemeManager`]: owns the current theme; `apply` recomputes it
//! - [`ThemeConfig`]: caller input, an algorithm selector plus token overrides
//! - [`Algorithm`]: `default`, `dark`, `compact` or a custom derivation
//! - [`ResolvedTheme`]: flat token map plus the legacy `colors` block
//! - [`ThemeProvider`]: a mounted view that follows every apply
//! - [`TokenEngine`]: expands a configuration into computed tokens
//!
//! ## Quick Start
//!
//! ```rust
//! use themeweave::{Algorithm, ThemeConfig, ThemeManager};
//!
//! let mut manager = ThemeManager::from_config(Some(
//!     ThemeConfig::new()
//!         .with_algorithm(Algorithm::Default)
//!         .with_token("colorPrimary", "#123456"),
//! ))
//! .unwrap();
//!
//! let theme = manager.theme().unwrap();
//! assert_eq!(theme.get_str("colorPrimary"), Some("#123456"));
//! assert_eq!(theme.colors().primary.base, "#123456");
//!
//! manager.toggle_dark_mode(true).unwrap();
//! assert_eq!(manager.theme().unwrap().get_str("colorBgElevated"), Some("#1622b7"));
//! ```
//!
//! ## Token Precedence
//!
//! Lowest first: application defaults, the light or dark brand palette,
//! caller overrides, engine-derived tokens. Only allow-listed engine tokens
//! are republished; see [`token::ALLOWED_TOKENS`].
//!
//! ## Serialized Configs
//!
//! Configurations round-trip through JSON and YAML with algorithms written as
//! string tags:
//!
//! ```rust
//! use themeweave::{SerializableThemeConfig, ThemeManager};
//!
//! let mut manager = ThemeManager::new();
//! let config = SerializableThemeConfig::from_json(r#"{"algorithm": ["dark", "compact"]}"#).unwrap();
//! manager.apply_serialized(&config).unwrap();
//!
//! assert!(manager.to_json().unwrap().contains("\"dark\""));
//! ```
//!
//! ## Logging
//!
//! The crate logs through the `log` facade and installs no logger.

pub mod algorithm;
pub mod colorspace;
pub mod config;
pub mod engine;
mod error;
pub mod legacy;
pub mod prelude;
pub mod provider;
pub mod theme;
pub mod token;

// Error types
pub use error::{ConfigError, EngineError, Result, ThemeError};

// Algorithm exports
pub use algorithm::{Algorithm, AlgorithmRegistry, AlgorithmSelector, DerivationAlgorithm};

// Config exports
pub use config::{ConfigSource, SerializableThemeConfig, ThemeConfig};

// Engine exports
pub use engine::{DesignTokenEngine, TokenEngine};

// Theme exports
pub use theme::{
    detect_color_mode, set_theme_detector, ColorMode, ResolvedTheme, ThemeManager, ThemeState,
};

// Provider exports
pub use provider::{GlobalStyles, PresentationSink, ProviderTree, ThemeProvider, ThemeSnapshot};

// Token exports
pub use token::TokenMap;
