//! Convenient imports for applications.
//!
//! ```rust
//! use themeweave::prelude::*;
//!
//! let manager = ThemeManager::from_config(Some(ThemeConfig::new().with_algorithm(Algorithm::Dark))).unwrap();
//! assert!(manager.theme().unwrap().is_dark());
//! ```

pub use crate::{
    Algorithm, ResolvedTheme, ThemeConfig, ThemeError, ThemeManager, ThemeProvider, ThemeSnapshot,
    TokenEngine, TokenMap,
};
