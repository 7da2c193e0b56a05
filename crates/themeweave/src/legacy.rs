//! The legacy color block.
//!
//! Older presentation code reads colors as `theme.colors.primary.light2`
//! instead of named tokens. This block is computed last, from the already
//! resolved tokens plus the dark/light flag, and is never overwritten by any
//! token layer.
//!
//! Each system color expands into a family of shades mixed toward the
//! foreground (`dark1`, `dark2`) or the background (`light1`..`light5`).
//! Foreground and background swap in dark mode, so `light5` is always the
//! shade closest to the page background.

use serde::{Deserialize, Serialize};

use crate::colorspace::Rgb;
use crate::token::{token_str, TokenMap};

/// Used when a system color is missing or unparseable.
const FALLBACK_GRAY: Rgb = Rgb(0x66, 0x66, 0x66);

/// The seven system colors the legacy block is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemColors {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub error: Rgb,
    pub warning: Rgb,
    pub success: Rgb,
    pub info: Rgb,
    pub grayscale: Rgb,
}

impl SystemColors {
    /// Picks system colors out of resolved tokens.
    pub fn from_tokens(tokens: &TokenMap) -> Self {
        SystemColors {
            primary: system_color(tokens, "colorPrimary"),
            secondary: system_color(tokens, "colorLink"),
            error: system_color(tokens, "colorError"),
            warning: system_color(tokens, "colorWarning"),
            success: system_color(tokens, "colorSuccess"),
            info: system_color(tokens, "colorInfo"),
            grayscale: system_color(tokens, "colorTextBase"),
        }
    }
}

fn system_color(tokens: &TokenMap, name: &str) -> Rgb {
    match token_str(tokens, name) {
        Some(text) => Rgb::from_hex(text).unwrap_or_else(|err| {
            log::warn!("legacy colors: {} ({}), using gray", err, name);
            FALLBACK_GRAY
        }),
        None => FALLBACK_GRAY,
    }
}

/// Shades of one system color, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorVariants {
    pub base: String,
    pub dark1: String,
    pub dark2: String,
    pub light1: String,
    pub light2: String,
    pub light3: String,
    pub light4: String,
    pub light5: String,
}

impl ColorVariants {
    /// Expands `color` for the given mode.
    pub fn new(color: Rgb, is_dark: bool) -> Self {
        let (fg, bg) = if is_dark {
            (Rgb::WHITE, Rgb::BLACK)
        } else {
            (Rgb::BLACK, Rgb::WHITE)
        };
        let toward_fg = |amount: f64| color.mix(fg, amount).to_hex();
        let toward_bg = |amount: f64| color.mix(bg, amount).to_hex();

        ColorVariants {
            base: color.to_hex(),
            dark1: toward_fg(10.0),
            dark2: toward_fg(20.0),
            light1: toward_bg(20.0),
            light2: toward_bg(45.0),
            light3: toward_bg(70.0),
            light4: toward_bg(90.0),
            light5: toward_bg(95.0),
        }
    }
}

/// The complete legacy block, exposed as `colors` on a resolved theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyColors {
    pub primary: ColorVariants,
    pub secondary: ColorVariants,
    pub error: ColorVariants,
    pub warning: ColorVariants,
    pub alert: ColorVariants,
    pub success: ColorVariants,
    pub info: ColorVariants,
    pub grayscale: ColorVariants,
}

impl LegacyColors {
    /// Derives every family from `system` for the given mode.
    pub fn new(system: &SystemColors, is_dark: bool) -> Self {
        let variants = |color: Rgb| ColorVariants::new(color, is_dark);
        LegacyColors {
            primary: variants(system.primary),
            secondary: variants(system.secondary),
            error: variants(system.error),
            warning: variants(system.warning),
            alert: variants(system.warning),
            success: variants(system.success),
            info: variants(system.info),
            grayscale: variants(system.grayscale),
        }
    }

    /// Shorthand for `LegacyColors::new(&SystemColors::from_tokens(tokens), is_dark)`.
    pub fn from_tokens(tokens: &TokenMap, is_dark: bool) -> Self {
        Self::new(&SystemColors::from_tokens(tokens), is_dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::token_map;
    use serde_json::json;

    #[test]
    fn light_shades_move_toward_white() {
        let variants = ColorVariants::new(Rgb::BLACK, false);
        assert_eq!(variants.base, "#000000");
        assert_eq!(variants.light3, "#b3b3b3");
        assert_eq!(variants.light5, "#f2f2f2");
        // toward black stays black
        assert_eq!(variants.dark2, "#000000");
    }

    #[test]
    fn dark_mode_swaps_targets() {
        let variants = ColorVariants::new(Rgb::WHITE, true);
        assert_eq!(variants.light5, "#0d0d0d");
        assert_eq!(variants.dark1, "#ffffff");

        let navy = Rgb::from_hex("#051556").unwrap();
        let light = ColorVariants::new(navy, false);
        let dark = ColorVariants::new(navy, true);
        assert_ne!(light.light1, dark.light1);
        assert_eq!(light.base, dark.base);
    }

    #[test]
    fn system_colors_read_tokens() {
        let tokens = token_map([
            ("colorPrimary", json!("#051556")),
            ("colorLink", json!("#1622b7")),
            ("colorWarning", json!("#fcc700")),
        ]);
        let system = SystemColors::from_tokens(&tokens);
        assert_eq!(system.primary, Rgb(5, 21, 86));
        assert_eq!(system.secondary, Rgb(22, 34, 183));
        assert_eq!(system.error, FALLBACK_GRAY);
    }

    #[test]
    fn unparseable_colors_fall_back() {
        let tokens = token_map([("colorPrimary", json!("rgba(1, 2, 3, 0.5)"))]);
        assert_eq!(SystemColors::from_tokens(&tokens).primary, FALLBACK_GRAY);
    }

    #[test]
    fn alert_mirrors_warning() {
        let tokens = token_map([("colorWarning", json!("#fcc700"))]);
        let colors = LegacyColors::from_tokens(&tokens, false);
        assert_eq!(colors.alert, colors.warning);
        assert_eq!(colors.warning.base, "#fcc700");
    }
}
