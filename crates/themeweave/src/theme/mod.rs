//! Resolved themes and the manager that produces them.
//!
//! A [`ThemeManager`] turns a [`ThemeConfig`](crate::ThemeConfig) into a
//! [`ResolvedTheme`] by layering four token sources, lowest precedence first:
//!
//! 1. Application defaults (brand logo, fonts, shared status colors)
//! 2. The brand palette for the selected variant (light or dark)
//! 3. Caller token overrides
//! 4. Engine-derived tokens, filtered to the allow-list
//!
//! The legacy `colors` block is derived last from the engine output and the
//! dark flag.
//!
//! ## Variant Detection
//!
//! A configuration is dark when its algorithm selector is the dark algorithm,
//! or a list containing it anywhere. Only the built-in dark algorithm counts;
//! a custom algorithm never switches the brand palette.
//!
//! ```rust
//! use themeweave::{Algorithm, ThemeConfig, ThemeManager};
//!
//! let config = ThemeConfig::new().with_algorithm(vec![Algorithm::Compact, Algorithm::Dark]);
//! let manager = ThemeManager::from_config(Some(config)).unwrap();
//!
//! let theme = manager.theme().unwrap();
//! assert!(theme.is_dark());
//! assert_eq!(theme.get_str("colorBgElevated"), Some("#1622b7"));
//! ```
//!
//! ## Lifecycle
//!
//! A manager is [`ThemeState::Uninitialized`] until its first successful apply
//! and [`ThemeState::Ready`] from then on. Mounting a provider or exporting
//! the configuration before that fails with
//! [`ThemeError::NotInitialized`](crate::ThemeError::NotInitialized).
//!
//! ## Color Mode Detection
//!
//! [`detect_color_mode`] queries the OS for the user's preferred scheme.
//! Override it for testing with [`set_theme_detector`].

mod adaptive;
mod manager;
mod resolved;

pub use adaptive::{detect_color_mode, set_theme_detector, ColorMode};
pub use manager::{ThemeManager, ThemeState};
pub use resolved::ResolvedTheme;
