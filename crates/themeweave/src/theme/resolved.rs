use serde::Serialize;
use serde_json::Value;

use crate::legacy::LegacyColors;
use crate::token::{default_tokens, layered, token_f64, token_str, variant_tokens, TokenMap};

/// Serialized name of the legacy color block; never a token name.
const LEGACY_KEY: &str = "colors";

/// A fully merged theme, as published to presentation code.
///
/// Built once per apply and never mutated afterwards. Serializes as a flat
/// token object with the legacy block under `colors`:
///
/// ```json
/// { "brandLogoAlt": "Edrak Analytics", "colorPrimary": "#051556", ..., "colors": { "primary": { "base": "#051556", ... } } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTheme {
    #[serde(flatten)]
    tokens: TokenMap,
    colors: LegacyColors,
    #[serde(skip)]
    is_dark: bool,
}

impl ResolvedTheme {
    /// Assembles a theme from its layers.
    ///
    /// `overrides` is the effective caller token map and `computed` the
    /// allow-listed engine output. Tokens resolve as defaults, then the
    /// variant palette, then `overrides`, then `computed`. The legacy block is
    /// derived from `computed` alone.
    pub fn assemble(overrides: &TokenMap, computed: &TokenMap, is_dark: bool) -> Self {
        let mut tokens = layered([
            default_tokens(),
            variant_tokens(is_dark),
            overrides,
            computed,
        ]);
        if tokens.remove(LEGACY_KEY).is_some() {
            log::warn!(
                "token '{}' is reserved for the legacy color block, ignoring it",
                LEGACY_KEY
            );
        }
        ResolvedTheme {
            tokens,
            colors: LegacyColors::from_tokens(computed, is_dark),
            is_dark,
        }
    }

    /// Every resolved token.
    pub fn tokens(&self) -> &TokenMap {
        &self.tokens
    }

    /// The legacy color block.
    pub fn colors(&self) -> &LegacyColors {
        &self.colors
    }

    /// Whether the dark variant was selected.
    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.tokens.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        token_str(&self.tokens, name)
    }

    /// Reads a numeric token; numeric strings like `"30px"` are accepted.
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        token_f64(&self.tokens, name)
    }

    pub fn logo_alt(&self) -> Option<&str> {
        self.get_str("brandLogoAlt")
    }

    pub fn logo_url(&self) -> Option<&str> {
        self.get_str("brandLogoUrl")
    }

    pub fn logo_href(&self) -> Option<&str> {
        self.get_str("brandLogoHref")
    }

    pub fn logo_height(&self) -> Option<&str> {
        self.get_str("brandLogoHeight")
    }

    pub fn logo_margin(&self) -> Option<&str> {
        self.get_str("brandLogoMargin")
    }

    pub fn icon_max_width(&self) -> Option<f64> {
        self.get_f64("brandIconMaxWidth")
    }

    /// Renders the theme as pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
