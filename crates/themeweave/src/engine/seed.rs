//! Seed tokens: the compact inputs every other token is derived from.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

use crate::colorspace::Rgb;
use crate::error::EngineError;
use crate::token::{token_map, value_as_f64, TokenMap};

/// Seed tokens that must hold a hex color.
const COLOR_SEEDS: &[&str] = &[
    "colorPrimary",
    "colorSuccess",
    "colorWarning",
    "colorError",
    "colorInfo",
    "colorLink",
    "colorTextBase",
    "colorBgBase",
];

/// Seed tokens that must hold a number (or numeric string).
const NUMERIC_SEEDS: &[&str] = &[
    "fontSize",
    "lineWidth",
    "motionUnit",
    "motionBase",
    "borderRadius",
    "sizeUnit",
    "sizeStep",
    "sizePopupArrow",
    "controlHeight",
    "zIndexBase",
    "zIndexPopupBase",
    "opacityImage",
];

/// Color seeds that may be left unset, either missing or as an empty string.
const OPTIONAL_COLOR_SEEDS: &[&str] = &["colorLink", "colorTextBase", "colorBgBase"];

/// Seed tokens with free-form values.
const OTHER_SEEDS: &[&str] = &["fontFamily", "fontFamilyCode", "lineType", "wireframe", "motion"];

static SEED_DEFAULTS: Lazy<TokenMap> = Lazy::new(|| {
    token_map([
        ("colorPrimary", json!("#1677ff")),
        ("colorSuccess", json!("#52c41a")),
        ("colorWarning", json!("#faad14")),
        ("colorError", json!("#ff4d4f")),
        ("colorInfo", json!("#1677ff")),
        (
            "fontFamily",
            json!("-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif"),
        ),
        (
            "fontFamilyCode",
            json!("'SFMono-Regular', Consolas, 'Liberation Mono', Menlo, Courier, monospace"),
        ),
        ("fontSize", json!(14)),
        ("lineWidth", json!(1)),
        ("lineType", json!("solid")),
        ("motionUnit", json!(0.1)),
        ("motionBase", json!(0)),
        ("borderRadius", json!(6)),
        ("sizeUnit", json!(4)),
        ("sizeStep", json!(4)),
        ("sizePopupArrow", json!(16)),
        ("controlHeight", json!(32)),
        ("zIndexBase", json!(0)),
        ("zIndexPopupBase", json!(1000)),
        ("opacityImage", json!(1)),
        ("wireframe", json!(false)),
        ("motion", json!(true)),
    ])
});

/// True for names the engine treats as seed tokens.
pub fn is_seed(name: &str) -> bool {
    COLOR_SEEDS.contains(&name) || NUMERIC_SEEDS.contains(&name) || OTHER_SEEDS.contains(&name)
}

/// True for an optional base color given as an empty string.
///
/// Such entries mean "derive it" and must not reach the alias step as text.
pub fn is_blank_optional(name: &str, value: &Value) -> bool {
    OPTIONAL_COLOR_SEEDS.contains(&name) && matches!(value, Value::String(s) if s.is_empty())
}

/// Built-in seed values.
pub fn seed_defaults() -> &'static TokenMap {
    &SEED_DEFAULTS
}

/// Seed defaults overlaid with the seed-named entries of `overrides`.
pub fn seed_tokens(overrides: &TokenMap) -> TokenMap {
    let mut seed = SEED_DEFAULTS.clone();
    for (name, value) in overrides {
        if is_seed(name) {
            seed.insert(name.clone(), value.clone());
        }
    }
    seed
}

/// Typed view of a seed token map.
///
/// Built-in algorithms work from this; it is also the validation step that
/// turns malformed seed values into [`EngineError::InvalidToken`].
#[derive(Debug, Clone, PartialEq)]
pub struct Seed {
    pub primary: Rgb,
    pub success: Rgb,
    pub warning: Rgb,
    pub error: Rgb,
    pub info: Rgb,
    pub link: Option<Rgb>,
    pub text_base: Option<Rgb>,
    pub bg_base: Option<Rgb>,
    pub font_size: f64,
    pub line_width: f64,
    pub motion_unit: f64,
    pub motion_base: f64,
    pub border_radius: f64,
    pub size_unit: f64,
    pub size_step: f64,
    pub control_height: f64,
}

impl Seed {
    /// Parses and validates a seed token map.
    ///
    /// Missing values fall back to the built-in seed defaults.
    pub fn from_tokens(tokens: &TokenMap) -> Result<Self, EngineError> {
        for name in NUMERIC_SEEDS {
            if let Some(value) = tokens.get(*name) {
                parse_number(name, value)?;
            }
        }

        Ok(Seed {
            primary: required_color(tokens, "colorPrimary")?,
            success: required_color(tokens, "colorSuccess")?,
            warning: required_color(tokens, "colorWarning")?,
            error: required_color(tokens, "colorError")?,
            info: required_color(tokens, "colorInfo")?,
            link: optional_color(tokens, "colorLink")?,
            text_base: optional_color(tokens, "colorTextBase")?,
            bg_base: optional_color(tokens, "colorBgBase")?,
            font_size: required_number(tokens, "fontSize")?,
            line_width: required_number(tokens, "lineWidth")?,
            motion_unit: required_number(tokens, "motionUnit")?,
            motion_base: required_number(tokens, "motionBase")?,
            border_radius: required_number(tokens, "borderRadius")?,
            size_unit: required_number(tokens, "sizeUnit")?,
            size_step: required_number(tokens, "sizeStep")?,
            control_height: required_number(tokens, "controlHeight")?,
        })
    }
}

fn parse_color(name: &str, value: &Value) -> Result<Rgb, EngineError> {
    let text = value
        .as_str()
        .ok_or_else(|| EngineError::invalid_token(name, format!("expected a color string, got {}", value)))?;
    Rgb::from_hex(text).map_err(|err| EngineError::invalid_token(name, err.to_string()))
}

fn parse_number(name: &str, value: &Value) -> Result<f64, EngineError> {
    value_as_f64(value)
        .filter(|n| n.is_finite())
        .ok_or_else(|| EngineError::invalid_token(name, format!("expected a number, got {}", value)))
}

fn optional_color(tokens: &TokenMap, name: &str) -> Result<Option<Rgb>, EngineError> {
    match tokens.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(value) => parse_color(name, value).map(Some),
    }
}

fn required_color(tokens: &TokenMap, name: &str) -> Result<Rgb, EngineError> {
    match tokens.get(name).or_else(|| SEED_DEFAULTS.get(name)) {
        Some(value) => parse_color(name, value),
        None => Err(EngineError::invalid_token(name, "missing")),
    }
}

fn required_number(tokens: &TokenMap, name: &str) -> Result<f64, EngineError> {
    match tokens.get(name).or_else(|| SEED_DEFAULTS.get(name)) {
        Some(value) => parse_number(name, value),
        None => Err(EngineError::invalid_token(name, "missing")),
    }
}
