//! Design tokens and the fixed token sets the manager layers together.
//!
//! A token is a single named design value (a color, a font stack, a size).
//! Token values are arbitrary JSON values, so a [`TokenMap`] can carry strings
//! (`"#051556"`), numbers (`0.3`) and anything else a presentation layer
//! wants to read.
//!
//! Maps are ordered by key ([`BTreeMap`]), which makes every merge in this
//! crate independent of the order keys were inserted in the source objects.
//!
//! ## Layering
//!
//! Resolution always happens by layering maps on top of each other, later
//! layers replacing earlier values for the same key:
//!
//! ```rust
//! use serde_json::json;
//! use themeweave::token::{layered, TokenMap};
//!
//! let base: TokenMap = [("colorPrimary".to_string(), json!("#051556"))].into();
//! let user: TokenMap = [("colorPrimary".to_string(), json!("#123456"))].into();
//!
//! let merged = layered([&base, &user]);
//! assert_eq!(merged["colorPrimary"], json!("#123456"));
//! ```

mod allowlist;
mod brand;

use std::collections::BTreeMap;

use serde_json::Value;

pub use allowlist::{filter_allowed, is_allowed, ALLOWED_TOKENS};
pub use brand::{dark_tokens, default_tokens, light_tokens, variant_tokens};

/// A token name → value mapping.
pub type TokenMap = BTreeMap<String, Value>;

/// Copies every entry of `layer` into `target`, replacing existing keys.
pub fn merge_into(target: &mut TokenMap, layer: &TokenMap) {
    for (key, value) in layer {
        target.insert(key.clone(), value.clone());
    }
}

/// Merges layers in order; for any key the last layer that defines it wins.
pub fn layered<'a, I>(layers: I) -> TokenMap
where
    I: IntoIterator<Item = &'a TokenMap>,
{
    let mut merged = TokenMap::new();
    for layer in layers {
        merge_into(&mut merged, layer);
    }
    merged
}

/// Builds a map from static pairs.
pub(crate) fn token_map<I>(pairs: I) -> TokenMap
where
    I: IntoIterator<Item = (&'static str, Value)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Reads a token as a string slice.
pub fn token_str<'a>(tokens: &'a TokenMap, key: &str) -> Option<&'a str> {
    tokens.get(key).and_then(Value::as_str)
}

/// Reads a token as a number, accepting numeric strings such as `"28"` or `"12px"`.
pub fn token_f64(tokens: &TokenMap, key: &str) -> Option<f64> {
    value_as_f64(tokens.get(key)?)
}

pub(crate) fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            s.strip_suffix("px").unwrap_or(s).trim().parse().ok()
        }
        _ => None,
    }
}

/// Converts a computed `f64` into a JSON number, keeping whole values integral.
pub(crate) fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}
