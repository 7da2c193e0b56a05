//! Built-in derivation algorithms: seed tokens → map tokens.
//!
//! - `default` derives everything for a light surface.
//! - `dark` starts from the previous map (or runs `default` first) and
//!   replaces every color with its dark-surface counterpart.
//! - `compact` starts from the previous map (or `default`) and tightens
//!   font sizes, spacing and control heights.
//!
//! Colors are produced as opaque hex strings: translucent roles (secondary
//! text, fills) are composited over the base background instead of being
//! emitted as `rgba()`.

use serde_json::{json, Value};

use super::seed::Seed;
use crate::algorithm::Algorithm;
use crate::colorspace::Rgb;
use crate::error::EngineError;
use crate::token::{number, token_f64, TokenMap};

/// Runs one algorithm.
pub fn derive(
    algorithm: &Algorithm,
    seed: &TokenMap,
    prior: Option<&TokenMap>,
) -> Result<TokenMap, EngineError> {
    match algorithm {
        Algorithm::Default => default_algorithm(seed),
        Algorithm::Dark => dark_algorithm(seed, prior),
        Algorithm::Compact => compact_algorithm(seed, prior),
        Algorithm::Custom(custom) => custom.derive(seed, prior).map_err(|err| match err {
            EngineError::InvalidToken { .. } => err,
            EngineError::Algorithm { message, .. } => EngineError::Algorithm {
                algorithm: custom.name().to_string(),
                message,
            },
        }),
    }
}

fn default_algorithm(seed_tokens: &TokenMap) -> Result<TokenMap, EngineError> {
    let seed = Seed::from_tokens(seed_tokens)?;
    let mut map = seed_tokens.clone();

    insert_colors(&mut map, &seed, Surface::Light);
    insert_sizes(&mut map, seed.size_unit, seed.size_step);
    insert_font_sizes(&mut map, seed.font_size);
    insert_control_heights(&mut map, seed.control_height);
    insert_radii(&mut map, seed.border_radius);
    insert_motion(&mut map, &seed);
    map.insert("lineWidthBold".into(), number(seed.line_width + 1.0));

    Ok(map)
}

fn dark_algorithm(seed_tokens: &TokenMap, prior: Option<&TokenMap>) -> Result<TokenMap, EngineError> {
    let seed = Seed::from_tokens(seed_tokens)?;
    let mut map = match prior {
        Some(prior) => prior.clone(),
        None => default_algorithm(seed_tokens)?,
    };
    insert_colors(&mut map, &seed, Surface::Dark);
    Ok(map)
}

fn compact_algorithm(
    seed_tokens: &TokenMap,
    prior: Option<&TokenMap>,
) -> Result<TokenMap, EngineError> {
    let seed = Seed::from_tokens(seed_tokens)?;
    let mut map = match prior {
        Some(prior) => prior.clone(),
        None => default_algorithm(seed_tokens)?,
    };

    let font_size = token_f64(&map, "fontSizeSM").unwrap_or(seed.font_size - 2.0);
    let control_height = token_f64(&map, "controlHeight").unwrap_or(seed.control_height) - 4.0;

    insert_font_sizes(&mut map, font_size);
    insert_compact_sizes(&mut map, seed.size_unit, seed.size_step);
    insert_control_heights(&mut map, control_height);
    Ok(map)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Surface {
    Light,
    Dark,
}

impl Surface {
    fn bg(self, seed: &Seed) -> Rgb {
        match self {
            Surface::Light => seed.bg_base.unwrap_or(Rgb::WHITE),
            Surface::Dark => seed.bg_base.unwrap_or(Rgb::BLACK),
        }
    }

    fn text(self, seed: &Seed) -> Rgb {
        match self {
            Surface::Light => seed.text_base.unwrap_or(Rgb::BLACK),
            Surface::Dark => seed.text_base.unwrap_or(Rgb::WHITE),
        }
    }
}

fn put_color(map: &mut TokenMap, name: impl Into<String>, color: Rgb) {
    map.insert(name.into(), Value::String(color.to_hex()));
}

fn insert_colors(map: &mut TokenMap, seed: &Seed, surface: Surface) {
    let bg = surface.bg(seed);
    let text = surface.text(seed);

    map.insert("colorBgBase".into(), Value::String(bg.to_hex()));
    map.insert("colorTextBase".into(), Value::String(text.to_hex()));

    for (family, color) in [
        ("Primary", seed.primary),
        ("Success", seed.success),
        ("Warning", seed.warning),
        ("Error", seed.error),
        ("Info", seed.info),
    ] {
        insert_family(map, family, color, bg, text, surface);
    }

    insert_neutrals(map, bg, text, surface);
}

/// The ten-step palette for one color family.
fn insert_family(map: &mut TokenMap, family: &str, color: Rgb, bg: Rgb, text: Rgb, surface: Surface) {
    let (bg_steps, hover, active) = match surface {
        Surface::Light => (
            [0.90, 0.80, 0.60, 0.45],
            color.lerp_lab(bg, 0.25),
            color.lerp_lab(text, 0.20),
        ),
        Surface::Dark => (
            [0.85, 0.75, 0.60, 0.45],
            color.lerp_lab(text, 0.20),
            color.lerp_lab(bg, 0.20),
        ),
    };

    let name = |suffix: &str| format!("color{}{}", family, suffix);
    put_color(map, name("Bg"), color.lerp_lab(bg, bg_steps[0]));
    put_color(map, name("BgHover"), color.lerp_lab(bg, bg_steps[1]));
    put_color(map, name("Border"), color.lerp_lab(bg, bg_steps[2]));
    put_color(map, name("BorderHover"), color.lerp_lab(bg, bg_steps[3]));
    put_color(map, name("Hover"), hover);
    put_color(map, name(""), color);
    put_color(map, name("Active"), active);
    put_color(map, name("TextHover"), hover);
    put_color(map, name("Text"), color);
    put_color(map, name("TextActive"), active);
}

fn insert_neutrals(map: &mut TokenMap, bg: Rgb, text: Rgb, surface: Surface) {
    let over = |alpha: f64| text.over(bg, alpha);

    match surface {
        Surface::Light => {
            put_color(map, "colorText", over(0.88));
            put_color(map, "colorFill", over(0.15));
            put_color(map, "colorFillSecondary", over(0.06));
            put_color(map, "colorFillTertiary", over(0.04));
            put_color(map, "colorFillQuaternary", over(0.02));
            put_color(map, "colorBgContainer", bg);
            put_color(map, "colorBgElevated", bg);
            put_color(map, "colorBgLayout", over(0.04));
            put_color(map, "colorBgSpotlight", over(0.85));
            put_color(map, "colorBorder", over(0.15));
            put_color(map, "colorBorderSecondary", over(0.06));
        }
        Surface::Dark => {
            put_color(map, "colorText", over(0.85));
            put_color(map, "colorFill", over(0.18));
            put_color(map, "colorFillSecondary", over(0.12));
            put_color(map, "colorFillTertiary", over(0.08));
            put_color(map, "colorFillQuaternary", over(0.04));
            put_color(map, "colorBgContainer", over(0.08));
            put_color(map, "colorBgElevated", over(0.12));
            put_color(map, "colorBgLayout", bg);
            put_color(map, "colorBgSpotlight", over(0.26));
            put_color(map, "colorBorder", over(0.26));
            put_color(map, "colorBorderSecondary", over(0.19));
        }
    }

    put_color(map, "colorTextSecondary", over(0.65));
    put_color(map, "colorTextTertiary", over(0.45));
    put_color(map, "colorTextQuaternary", over(0.25));
    map.insert("colorBgMask".into(), json!("rgba(0, 0, 0, 0.45)"));
    put_color(map, "colorWhite", Rgb::WHITE);
}

fn insert_size_scale(map: &mut TokenMap, unit: f64, steps: [(&str, f64); 9]) {
    for (name, step) in steps {
        map.insert(name.to_string(), number((unit * step).max(0.0)));
    }
}

fn insert_sizes(map: &mut TokenMap, unit: f64, step: f64) {
    insert_size_scale(
        map,
        unit,
        [
            ("sizeXXL", step + 8.0),
            ("sizeXL", step + 4.0),
            ("sizeLG", step + 2.0),
            ("sizeMD", step + 1.0),
            ("sizeMS", step),
            ("size", step),
            ("sizeSM", step - 1.0),
            ("sizeXS", step - 2.0),
            ("sizeXXS", step - 3.0),
        ],
    );
}

fn insert_compact_sizes(map: &mut TokenMap, unit: f64, step: f64) {
    let step = step - 2.0;
    insert_size_scale(
        map,
        unit,
        [
            ("sizeXXL", step + 10.0),
            ("sizeXL", step + 6.0),
            ("sizeLG", step + 2.0),
            ("sizeMD", step + 2.0),
            ("sizeMS", step + 1.0),
            ("size", step),
            ("sizeSM", step),
            ("sizeXS", step - 1.0),
            ("sizeXXS", step - 1.0),
        ],
    );
}

/// Rounds to the nearest even pixel size.
fn even(size: f64) -> f64 {
    (size / 2.0).round() * 2.0
}

fn insert_font_sizes(map: &mut TokenMap, base: f64) {
    let sm = base - 2.0;
    let lg = base + 2.0;

    map.insert("fontSize".into(), number(base));
    map.insert("fontSizeSM".into(), number(sm));
    map.insert("fontSizeLG".into(), number(lg));
    map.insert("fontSizeXL".into(), number(base + 6.0));
    for (level, scale) in [(1, 38.0), (2, 30.0), (3, 24.0), (4, 20.0), (5, 16.0)] {
        map.insert(
            format!("fontSizeHeading{}", level),
            number(even(base * scale / 14.0)),
        );
    }

    let line_height = |size: f64| if size > 0.0 { (size + 8.0) / size } else { 1.0 };
    map.insert("lineHeight".into(), number(line_height(base)));
    map.insert("lineHeightSM".into(), number(line_height(sm)));
    map.insert("lineHeightLG".into(), number(line_height(lg)));
}

fn insert_control_heights(map: &mut TokenMap, height: f64) {
    map.insert("controlHeight".into(), number(height));
    map.insert("controlHeightXS".into(), number(height * 0.5));
    map.insert("controlHeightSM".into(), number(height * 0.75));
    map.insert("controlHeightLG".into(), number(height * 1.25));
}

fn insert_radii(map: &mut TokenMap, radius: f64) {
    let radius = radius.max(0.0);
    map.insert("borderRadiusXS".into(), number((radius / 3.0).floor()));
    map.insert("borderRadiusSM".into(), number((radius * 2.0 / 3.0).round()));
    map.insert("borderRadiusLG".into(), number((radius * 4.0 / 3.0).round()));
    map.insert("borderRadiusOuter".into(), number((radius - 2.0).max(0.0)));
}

fn seconds(value: f64) -> Value {
    let rounded = (value * 1000.0).round() / 1000.0;
    Value::String(format!("{}s", rounded))
}

fn insert_motion(map: &mut TokenMap, seed: &Seed) {
    map.insert(
        "motionDurationFast".into(),
        seconds(seed.motion_base + seed.motion_unit),
    );
    map.insert(
        "motionDurationMid".into(),
        seconds(seed.motion_base + seed.motion_unit * 2.0),
    );
    map.insert(
        "motionDurationSlow".into(),
        seconds(seed.motion_base + seed.motion_unit * 3.0),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::seed::{seed_defaults, seed_tokens};
    use crate::token::{token_map, token_str};

    fn run(algorithms: &[Algorithm], seed: &TokenMap) -> TokenMap {
        let mut map: Option<TokenMap> = None;
        for algorithm in algorithms {
            map = Some(derive(algorithm, seed, map.as_ref()).unwrap());
        }
        map.unwrap()
    }

    #[test]
    fn default_neutrals_match_light_surface() {
        let map = run(&[Algorithm::Default], seed_defaults());
        assert_eq!(token_str(&map, "colorBgContainer"), Some("#ffffff"));
        assert_eq!(token_str(&map, "colorBorder"), Some("#d9d9d9"));
        assert_eq!(token_str(&map, "colorBorderSecondary"), Some("#f0f0f0"));
        assert_eq!(token_str(&map, "colorBgLayout"), Some("#f5f5f5"));
        assert_eq!(token_str(&map, "colorTextBase"), Some("#000000"));
    }

    #[test]
    fn dark_neutrals_match_dark_surface() {
        let map = run(&[Algorithm::Dark], seed_defaults());
        assert_eq!(token_str(&map, "colorBgBase"), Some("#000000"));
        assert_eq!(token_str(&map, "colorBgContainer"), Some("#141414"));
        assert_eq!(token_str(&map, "colorBgElevated"), Some("#1f1f1f"));
        assert_eq!(token_str(&map, "colorBorder"), Some("#424242"));
    }

    #[test]
    fn seed_color_passes_through() {
        let seed = seed_tokens(&token_map([("colorPrimary", json!("#123456"))]));
        let map = run(&[Algorithm::Default], &seed);
        assert_eq!(token_str(&map, "colorPrimary"), Some("#123456"));
        assert_eq!(token_str(&map, "colorPrimaryText"), Some("#123456"));
    }

    #[test]
    fn light_family_backgrounds_are_lighter_than_base() {
        let map = run(&[Algorithm::Default], seed_defaults());
        let base = Rgb::from_hex(token_str(&map, "colorPrimary").unwrap()).unwrap();
        let bg = Rgb::from_hex(token_str(&map, "colorPrimaryBg").unwrap()).unwrap();
        let active = Rgb::from_hex(token_str(&map, "colorPrimaryActive").unwrap()).unwrap();
        assert!(bg.relative_luminance() > base.relative_luminance());
        assert!(active.relative_luminance() < base.relative_luminance());
    }

    #[test]
    fn dark_family_backgrounds_are_darker_than_base() {
        let map = run(&[Algorithm::Dark], seed_defaults());
        let base = Rgb::from_hex(token_str(&map, "colorPrimary").unwrap()).unwrap();
        let bg = Rgb::from_hex(token_str(&map, "colorPrimaryBg").unwrap()).unwrap();
        assert!(bg.relative_luminance() < base.relative_luminance());
    }

    #[test]
    fn default_sizes() {
        let map = run(&[Algorithm::Default], seed_defaults());
        assert_eq!(map["sizeXXL"], json!(48));
        assert_eq!(map["size"], json!(16));
        assert_eq!(map["sizeXXS"], json!(4));
        assert_eq!(map["fontSizeHeading1"], json!(38));
        assert_eq!(map["fontSizeHeading5"], json!(16));
        assert_eq!(map["controlHeightLG"], json!(40));
        assert_eq!(map["borderRadiusLG"], json!(8));
        assert_eq!(map["borderRadiusXS"], json!(2));
        assert_eq!(map["motionDurationSlow"], json!("0.3s"));
        assert_eq!(map["lineWidthBold"], json!(2));
    }

    #[test]
    fn compact_tightens_sizes() {
        let map = run(&[Algorithm::Compact], seed_defaults());
        assert_eq!(map["fontSize"], json!(12));
        assert_eq!(map["controlHeight"], json!(28));
        assert_eq!(map["size"], json!(8));
        assert_eq!(map["sizeXXL"], json!(48));
        // colors still derived from the default algorithm
        assert_eq!(token_str(&map, "colorBgContainer"), Some("#ffffff"));
    }

    #[test]
    fn dark_then_compact_keeps_dark_colors() {
        let map = run(&[Algorithm::Dark, Algorithm::Compact], seed_defaults());
        assert_eq!(token_str(&map, "colorBgContainer"), Some("#141414"));
        assert_eq!(map["controlHeight"], json!(28));
    }

    #[test]
    fn compact_then_dark_keeps_compact_sizes() {
        let map = run(&[Algorithm::Compact, Algorithm::Dark], seed_defaults());
        assert_eq!(token_str(&map, "colorBgContainer"), Some("#141414"));
        assert_eq!(map["controlHeight"], json!(28));
    }

    #[test]
    fn custom_algorithm_errors_are_tagged() {
        let failing = Algorithm::custom("broken", |_, _| {
            Err(EngineError::Algorithm {
                algorithm: "inner".into(),
                message: "boom".into(),
            })
        });
        let err = derive(&failing, seed_defaults(), None).unwrap_err();
        assert!(matches!(err, EngineError::Algorithm { ref algorithm, .. } if algorithm == "broken"));
        assert!(err.to_string().contains("boom"));
    }
}
