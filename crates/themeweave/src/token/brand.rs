//! Brand token sets.
//!
//! Three fixed layers sit underneath every caller configuration:
//!
//! - [`default_tokens`]: brand constants (logo, fonts, extra sizes) and the
//!   colors that do not change between variants.
//! - [`light_tokens`] / [`dark_tokens`]: the brand palette for each variant.
//!   Exactly one of them is applied, chosen by dark-variant detection.

use once_cell::sync::Lazy;
use serde_json::json;

use super::{token_map, TokenMap};

static DEFAULT_TOKENS: Lazy<TokenMap> = Lazy::new(|| {
    token_map([
        // Brand
        ("brandLogoAlt", json!("Edrak Analytics")),
        (
            "brandLogoUrl",
            json!("/static/assets/images/edrak/edrak-logo-horizon.png"),
        ),
        ("brandLogoMargin", json!("12px")),
        ("brandLogoHref", json!("/")),
        ("brandLogoHeight", json!("30px")),
        // Shared status colors, variants may override
        ("colorError", json!("#e04355")),
        ("colorWarning", json!("#fcc700")),
        // Fonts
        ("fontFamily", json!("'Inter', Helvetica, Arial")),
        ("fontFamilyCode", json!("'Fira Code', 'Courier New', monospace")),
        // Extra tokens
        ("transitionTiming", json!(0.3)),
        ("brandIconMaxWidth", json!(60)),
        ("fontSizeXS", json!("8")),
        ("fontSizeXXL", json!("28")),
        ("fontWeightNormal", json!("400")),
        ("fontWeightLight", json!("300")),
        ("fontWeightStrong", json!(500)),
    ])
});

static LIGHT_TOKENS: Lazy<TokenMap> = Lazy::new(|| {
    token_map([
        ("colorPrimary", json!("#051556")),
        ("colorLink", json!("#1622b7")),
        ("colorSuccess", json!("#1ed3b9")),
        ("colorInfo", json!("#5e4ef9")),
        ("colorText", json!("#051556")),
        ("colorTextSecondary", json!("#1622b7")),
        ("colorBgElevated", json!("#e6e4f2")),
        ("colorBorder", json!("#d1aaf2")),
    ])
});

static DARK_TOKENS: Lazy<TokenMap> = Lazy::new(|| {
    token_map([
        ("colorPrimary", json!("#9a9afc")),
        ("colorLink", json!("#9a9afc")),
        ("colorSuccess", json!("#1ed3b9")),
        ("colorInfo", json!("#9a9afc")),
        ("colorText", json!("#e6e4f2")),
        ("colorTextSecondary", json!("#d1aaf2")),
        ("colorBgElevated", json!("#1622b7")),
        ("colorBorder", json!("#5e4ef9")),
    ])
});

/// Application defaults, the lowest-precedence layer.
pub fn default_tokens() -> &'static TokenMap {
    &DEFAULT_TOKENS
}

/// Brand palette for the light variant.
pub fn light_tokens() -> &'static TokenMap {
    &LIGHT_TOKENS
}

/// Brand palette for the dark variant.
pub fn dark_tokens() -> &'static TokenMap {
    &DARK_TOKENS
}

/// Selects the brand palette for the detected variant.
pub fn variant_tokens(is_dark: bool) -> &'static TokenMap {
    if is_dark {
        dark_tokens()
    } else {
        light_tokens()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::token_str;

    #[test]
    fn variants_cover_the_same_keys() {
        let light: Vec<_> = light_tokens().keys().collect();
        let dark: Vec<_> = dark_tokens().keys().collect();
        assert_eq!(light, dark);
    }

    #[test]
    fn defaults_do_not_shadow_variant_colors() {
        for key in light_tokens().keys() {
            assert!(
                !default_tokens().contains_key(key),
                "default layer should not define variant key {}",
                key
            );
        }
    }

    #[test]
    fn variant_selection() {
        assert_eq!(
            token_str(variant_tokens(false), "colorBgElevated"),
            Some("#e6e4f2")
        );
        assert_eq!(
            token_str(variant_tokens(true), "colorBgElevated"),
            Some("#1622b7")
        );
    }
}
