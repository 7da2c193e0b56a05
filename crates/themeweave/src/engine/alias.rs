//! Alias tokens: role-specific names derived from the merged map.
//!
//! Aliases are computed after caller overrides are merged, so an override of
//! `colorText` also moves `colorTextHeading`. An alias the caller set
//! explicitly is never recomputed.

use serde_json::{json, Value};

use crate::colorspace::Rgb;
use crate::error::EngineError;
use crate::token::{token_str, TokenMap};

/// `(alias, source)`: the alias copies the source value.
const COPIES: &[(&str, &str)] = &[
    ("colorFillContent", "colorFillSecondary"),
    ("colorFillContentHover", "colorFill"),
    ("colorBgContainerDisabled", "colorFillTertiary"),
    ("colorBorderBg", "colorBgContainer"),
    ("colorSplit", "colorBorderSecondary"),
    ("colorTextHeading", "colorText"),
    ("colorTextLabel", "colorTextSecondary"),
    ("colorTextDescription", "colorTextTertiary"),
    ("colorTextDisabled", "colorTextQuaternary"),
    ("colorTextPlaceholder", "colorTextQuaternary"),
    ("colorTextLightSolid", "colorWhite"),
    ("colorHighlight", "colorError"),
    ("colorIcon", "colorTextTertiary"),
    ("colorIconHover", "colorText"),
    ("colorErrorOutline", "colorErrorBg"),
    ("colorWarningOutline", "colorWarningBg"),
    ("controlOutline", "colorPrimaryBg"),
    ("controlItemBgHover", "colorFillTertiary"),
    ("controlItemBgActive", "colorPrimaryBg"),
    ("fontSizeIcon", "fontSizeSM"),
    ("paddingXXS", "sizeXXS"),
    ("paddingXS", "sizeXS"),
    ("paddingSM", "sizeSM"),
    ("padding", "size"),
    ("paddingMD", "sizeMD"),
    ("paddingLG", "sizeLG"),
    ("paddingXL", "sizeXL"),
    ("paddingContentHorizontal", "sizeMS"),
    ("paddingContentVertical", "sizeSM"),
    ("marginXXS", "sizeXXS"),
    ("marginXS", "sizeXS"),
    ("marginSM", "sizeSM"),
    ("margin", "size"),
    ("marginMD", "sizeMD"),
    ("marginLG", "sizeLG"),
    ("marginXL", "sizeXL"),
    ("marginXXL", "sizeXXL"),
];

const CONSTANTS: &[(&str, &str)] = &[
    (
        "boxShadow",
        "0 6px 16px 0 rgba(0, 0, 0, 0.08), 0 3px 6px -4px rgba(0, 0, 0, 0.12), 0 9px 28px 8px rgba(0, 0, 0, 0.05)",
    ),
    (
        "boxShadowSecondary",
        "0 6px 16px 0 rgba(0, 0, 0, 0.08), 0 3px 6px -4px rgba(0, 0, 0, 0.12), 0 9px 28px 8px rgba(0, 0, 0, 0.05)",
    ),
    (
        "boxShadowTertiary",
        "0 1px 2px 0 rgba(0, 0, 0, 0.03), 0 1px 6px -1px rgba(0, 0, 0, 0.02), 0 2px 4px 0 rgba(0, 0, 0, 0.02)",
    ),
];

/// Fills alias tokens into `merged`, skipping names present in `explicit`.
pub fn apply_aliases(merged: &mut TokenMap, explicit: &TokenMap) -> Result<(), EngineError> {
    let set = |merged: &mut TokenMap, name: &str, value: Value| {
        if !explicit.contains_key(name) {
            merged.insert(name.to_string(), value);
        }
    };

    // Links follow the info color unless a link color was given
    if !merged.contains_key("colorLink") {
        if let Some(info) = merged.get("colorInfo").cloned() {
            set(merged, "colorLink", info);
        }
    }
    if let Some(link) = token_str(merged, "colorLink") {
        let link = parse(link, "colorLink")?;
        let (toward, away) = surface_targets(merged)?;
        set(merged, "colorLinkHover", json!(link.lerp_lab(toward, 0.25).to_hex()));
        set(merged, "colorLinkActive", json!(link.lerp_lab(away, 0.20).to_hex()));
    }

    for (alias, source) in COPIES {
        if let Some(value) = merged.get(*source).cloned() {
            set(merged, *alias, value);
        }
    }

    for (name, value) in CONSTANTS {
        set(merged, *name, json!(*value));
    }
    set(merged, "opacityLoading", json!(0.65));

    Ok(())
}

fn parse(text: &str, name: &str) -> Result<Rgb, EngineError> {
    Rgb::from_hex(text).map_err(|err| EngineError::invalid_token(name, err.to_string()))
}

/// `(hover target, active target)` for the current surface.
///
/// Hover moves away from the text color, toward the background on a light
/// surface and toward the text on a dark one; active moves the other way.
fn surface_targets(merged: &TokenMap) -> Result<(Rgb, Rgb), EngineError> {
    let bg = match token_str(merged, "colorBgBase") {
        Some(text) => parse(text, "colorBgBase")?,
        None => Rgb::WHITE,
    };
    let text = match token_str(merged, "colorTextBase") {
        Some(value) => parse(value, "colorTextBase")?,
        None => Rgb::BLACK,
    };
    if bg.is_dark() {
        Ok((text, bg))
    } else {
        Ok((bg, text))
    }
}
