//! OS color-mode detection.
//!
//! [`ThemeManager::from_system_preference`](crate::ThemeManager::from_system_preference)
//! picks the dark or light algorithm from the user's OS display mode. Use
//! [`set_theme_detector`] to override detection in tests.
//!
//! ```rust
//! use themeweave::{set_theme_detector, ColorMode, ThemeManager};
//!
//! set_theme_detector(|| ColorMode::Dark);
//! let manager = ThemeManager::from_system_preference().unwrap();
//! assert!(manager.theme().unwrap().is_dark());
//! # set_theme_detector(|| ColorMode::Light);
//! ```

use std::sync::{Mutex, PoisonError};

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;

use crate::algorithm::Algorithm;

/// The user's preferred color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Light background, dark text.
    #[default]
    Light,
    /// Dark background, light text.
    Dark,
}

impl ColorMode {
    pub fn is_dark(self) -> bool {
        self == ColorMode::Dark
    }

    /// The base algorithm for this mode.
    pub fn algorithm(self) -> Algorithm {
        match self {
            ColorMode::Light => Algorithm::Default,
            ColorMode::Dark => Algorithm::Dark,
        }
    }
}

type ThemeDetector = fn() -> ColorMode;

static THEME_DETECTOR: Lazy<Mutex<ThemeDetector>> = Lazy::new(|| Mutex::new(os_theme_detector));

/// Overrides the detector used by [`detect_color_mode`].
///
/// There is no reset; tests that force a mode should restore it afterwards.
pub fn set_theme_detector(detector: ThemeDetector) {
    let mut guard = THEME_DETECTOR
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = detector;
}

/// Detects the user's preferred color mode.
///
/// Queries the OS through `dark-light` unless a detector was installed with
/// [`set_theme_detector`]. An unspecified or undetectable mode is light.
pub fn detect_color_mode() -> ColorMode {
    let detector = THEME_DETECTOR
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    (*detector)()
}

fn os_theme_detector() -> ColorMode {
    match detect_os_theme() {
        Ok(OsThemeMode::Dark) => ColorMode::Dark,
        Ok(OsThemeMode::Light) | Ok(OsThemeMode::Unspecified) => ColorMode::Light,
        Err(err) => {
            log::debug!("color mode detection failed, assuming light: {}", err);
            ColorMode::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn detector_override_is_used() {
        set_theme_detector(|| ColorMode::Dark);
        assert_eq!(detect_color_mode(), ColorMode::Dark);

        set_theme_detector(|| ColorMode::Light);
        assert_eq!(detect_color_mode(), ColorMode::Light);
    }

    #[test]
    fn modes_map_to_base_algorithms() {
        assert_eq!(ColorMode::Dark.algorithm(), Algorithm::Dark);
        assert_eq!(ColorMode::Light.algorithm(), Algorithm::Default);
        assert!(!ColorMode::default().is_dark());
    }
}
