//! End-to-end tests for theme resolution with the built-in engine.

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use serde_json::json;
use serial_test::serial;
use tempfile::TempDir;
use themeweave::algorithm::DerivationAlgorithm;
use themeweave::provider::ProviderLayer;
use themeweave::{
    set_theme_detector, Algorithm, AlgorithmSelector, ColorMode, ConfigError, EngineError,
    SerializableThemeConfig, ThemeConfig, ThemeError, ThemeManager, ThemeSnapshot, ThemeState,
    TokenMap,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ready(config: ThemeConfig) -> ThemeManager {
    init_logging();
    ThemeManager::from_config(Some(config)).unwrap()
}

/// Warms the background toward sepia; deterministic so themes compare equal.
struct Sepia;

impl DerivationAlgorithm for Sepia {
    fn name(&self) -> &str {
        "sepia"
    }

    fn derive(&self, seed: &TokenMap, prior: Option<&TokenMap>) -> Result<TokenMap, EngineError> {
        let mut map = prior.cloned().unwrap_or_else(|| seed.clone());
        map.insert("colorBgContainer".into(), json!("#f4ecd8"));
        Ok(map)
    }
}

// ============================================================================
// Variant selection
// ============================================================================

#[test]
fn no_algorithm_uses_light_brand_tokens() {
    let manager = ready(ThemeConfig::new());
    let theme = manager.theme().unwrap();

    assert!(!theme.is_dark());
    assert_eq!(theme.get_str("colorPrimary"), Some("#051556"));
    assert_eq!(theme.get_str("colorBorder"), Some("#d1aaf2"));
    assert_eq!(theme.get_str("colorBgElevated"), Some("#e6e4f2"));
}

#[test]
fn caller_primary_beats_light_brand_color() {
    let manager = ready(ThemeConfig::new().with_token("colorPrimary", "#123456"));
    let theme = manager.theme().unwrap();

    assert_eq!(theme.get_str("colorPrimary"), Some("#123456"));
    assert_eq!(theme.get_str("colorBorder"), Some("#d1aaf2"));
}

#[test]
fn dark_scalar_uses_dark_brand_tokens() {
    let manager = ready(ThemeConfig::new().with_algorithm(Algorithm::Dark));
    let theme = manager.theme().unwrap();

    assert!(theme.is_dark());
    assert_eq!(theme.get_str("colorBgElevated"), Some("#1622b7"));
    assert_eq!(theme.get_str("colorBorder"), Some("#5e4ef9"));
}

#[test]
fn dark_anywhere_in_list_is_dark() {
    let manager = ready(
        ThemeConfig::new().with_algorithm(vec![Algorithm::Compact, Algorithm::Dark]),
    );
    let theme = manager.theme().unwrap();

    assert!(theme.is_dark());
    assert_eq!(theme.get_str("colorPrimary"), Some("#9a9afc"));
}

#[test]
fn custom_algorithm_named_dark_is_not_dark() {
    let impostor = Algorithm::custom("dark", |seed, prior| {
        Ok(prior.cloned().unwrap_or_else(|| seed.clone()))
    });
    let manager = ready(ThemeConfig::new().with_algorithm(impostor));
    assert!(!manager.theme().unwrap().is_dark());
}

#[test]
fn defaults_are_always_present() {
    let manager = ready(ThemeConfig::new().with_algorithm(Algorithm::Dark));
    let theme = manager.theme().unwrap();

    assert_eq!(theme.logo_alt(), Some("Edrak Analytics"));
    assert_eq!(theme.get_str("fontFamily"), Some("'Inter', Helvetica, Arial"));
    assert_eq!(theme.get("fontWeightStrong"), Some(&json!(500)));
    assert_eq!(theme.get("transitionTiming"), Some(&json!(0.3)));
}

// ============================================================================
// Toggle
// ============================================================================

#[test]
fn toggle_on_list_keeps_other_algorithms() {
    let mut manager = ready(
        ThemeConfig::new().with_algorithm(vec![Algorithm::Compact, Algorithm::Default]),
    );
    manager.toggle_dark_mode(true).unwrap();

    let config = manager.config().unwrap();
    assert_eq!(
        config.algorithm,
        Some(AlgorithmSelector::List(vec![Algorithm::Dark, Algorithm::Compact]))
    );
    assert!(manager.theme().unwrap().is_dark());

    manager.toggle_dark_mode(false).unwrap();
    assert_eq!(
        manager.config().unwrap().algorithm,
        Some(AlgorithmSelector::List(vec![Algorithm::Default, Algorithm::Compact]))
    );
    assert_eq!(
        manager.theme().unwrap().get_str("colorBgElevated"),
        Some("#e6e4f2")
    );
}

#[test]
fn toggle_on_scalar_replaces_it() {
    let mut manager = ready(ThemeConfig::new().with_algorithm(Algorithm::Compact));
    manager.toggle_dark_mode(true).unwrap();
    assert_eq!(
        manager.config().unwrap().algorithm,
        Some(AlgorithmSelector::Single(Algorithm::Dark))
    );
}

#[test]
fn toggle_keeps_caller_tokens() {
    let mut manager = ready(ThemeConfig::new().with_token("colorPrimary", "#123456"));
    manager.toggle_dark_mode(true).unwrap();

    let theme = manager.theme().unwrap();
    assert_eq!(theme.get_str("colorPrimary"), Some("#123456"));
    assert_eq!(theme.get_str("colorBorder"), Some("#5e4ef9"));
}

// ============================================================================
// Export and round-trip
// ============================================================================

#[test]
fn export_replaces_algorithms_with_tags() {
    let manager = ready(
        ThemeConfig::new()
            .with_algorithm(vec![Algorithm::Dark, Algorithm::Compact])
            .with_token("colorPrimary", "#123456"),
    );
    let exported = manager.export_config().unwrap();

    assert_eq!(
        exported.algorithm.as_ref().map(|a| a.to_vec()),
        Some(vec!["dark", "compact"])
    );
    let token = exported.token.unwrap();
    assert_eq!(token["colorPrimary"], json!("#123456"));
    // application defaults are part of the constructed config
    assert_eq!(token["brandLogoAlt"], json!("Edrak Analytics"));
}

#[test]
fn export_leaves_out_the_brand_palette() {
    let mut manager = ready(ThemeConfig::new().with_token("colorPrimary", "#123456"));
    let provider = manager.mount().unwrap();

    let token = manager.export_config().unwrap().token.unwrap();
    assert!(!token.contains_key("colorBorder"));
    assert_eq!(provider.config().tokens()["colorBorder"], json!("#d1aaf2"));

    manager.toggle_dark_mode(true).unwrap();
    let token = manager.export_config().unwrap().token.unwrap();
    assert!(!token.contains_key("colorBgElevated"));
    assert_eq!(provider.config().tokens()["colorBgElevated"], json!("#1622b7"));
}

#[test]
fn json_text_is_two_space_indented() {
    init_logging();
    let mut manager = ThemeManager::new();
    manager
        .apply(
            ThemeConfig::new()
                .with_algorithm(Algorithm::Dark)
                .with_token("colorPrimary", "#123456"),
        )
        .unwrap();

    assert_eq!(
        manager.to_json().unwrap(),
        "{\n  \"algorithm\": \"dark\",\n  \"token\": {\n    \"colorPrimary\": \"#123456\"\n  }\n}"
    );
    assert!(manager.to_yaml().unwrap().contains("algorithm: dark"));
}

#[test]
fn export_then_reapply_reproduces_theme() {
    let original = ready(
        ThemeConfig::new()
            .with_algorithm(vec![Algorithm::Dark, Algorithm::Compact])
            .with_token("colorLink", "#00aa88")
            .with_token("borderRadius", 4),
    );

    let text = original.to_json().unwrap();
    let parsed = SerializableThemeConfig::from_json(&text).unwrap();

    let mut copy = ThemeManager::new();
    copy.apply_serialized(&parsed).unwrap();

    assert_eq!(*original.theme().unwrap(), *copy.theme().unwrap());
    assert_eq!(original.export_config().unwrap(), copy.export_config().unwrap());
}

#[test]
fn custom_algorithms_round_trip_through_the_registry() {
    init_logging();
    let sepia: Rc<dyn DerivationAlgorithm> = Rc::new(Sepia);

    let mut original = ThemeManager::new();
    original.register_algorithm(Rc::clone(&sepia)).unwrap();
    original
        .apply(
            ThemeConfig::new()
                .with_algorithm(vec![Algorithm::Default, Algorithm::Custom(Rc::clone(&sepia))]),
        )
        .unwrap();
    assert_eq!(
        original.theme().unwrap().get_str("colorBgContainer"),
        Some("#f4ecd8")
    );

    let exported = original.export_config().unwrap();

    // unregistered tag
    let mut stranger = ThemeManager::new();
    let err = stranger.apply_serialized(&exported).unwrap_err();
    assert!(matches!(
        err,
        ThemeError::Config(ConfigError::UnknownAlgorithm(ref tag)) if tag == "sepia"
    ));
    assert_eq!(stranger.state(), ThemeState::Uninitialized);

    let mut copy = ThemeManager::new();
    copy.register_algorithm(sepia).unwrap();
    copy.apply_serialized(&exported).unwrap();
    assert_eq!(*original.theme().unwrap(), *copy.theme().unwrap());
}

#[test]
fn builtin_names_cannot_be_registered() {
    let mut manager = ThemeManager::new();
    let err = manager
        .register_algorithm(Rc::new(NamedDark))
        .unwrap_err();
    assert!(matches!(
        err,
        ThemeError::Config(ConfigError::DuplicateAlgorithm(ref name)) if name == "dark"
    ));
}

struct NamedDark;

impl DerivationAlgorithm for NamedDark {
    fn name(&self) -> &str {
        "dark"
    }

    fn derive(&self, seed: &TokenMap, _prior: Option<&TokenMap>) -> Result<TokenMap, EngineError> {
        Ok(seed.clone())
    }
}

#[test]
fn export_before_apply_fails() {
    let manager = ThemeManager::new();
    assert!(matches!(
        manager.to_json(),
        Err(ThemeError::NotInitialized { .. })
    ));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn engine_errors_propagate_and_keep_state() {
    let mut manager = ready(ThemeConfig::new().with_algorithm(Algorithm::Dark));
    let before = manager.export_config().unwrap();

    let err = manager
        .apply(ThemeConfig::new().with_token("colorPrimary", "not-a-color"))
        .unwrap_err();
    match err {
        ThemeError::Engine(EngineError::InvalidToken { token, .. }) => {
            assert_eq!(token, "colorPrimary")
        }
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(manager.export_config().unwrap(), before);
    assert!(manager.theme().unwrap().is_dark());
}

#[test]
fn blank_base_colors_do_not_break_apply() {
    for name in ["colorBgBase", "colorLink", "colorTextBase"] {
        init_logging();
        let manager = ThemeManager::from_config(Some(ThemeConfig::new().with_token(name, "")))
            .unwrap_or_else(|err| panic!("{name} = \"\" failed: {err}"));
        assert!(manager.is_ready(), "{name}");
    }
}

#[test]
fn malformed_hex_digits_are_rejected() {
    init_logging();
    let err = ThemeManager::from_config(Some(
        ThemeConfig::new().with_token("colorPrimary", "#+1+2+3"),
    ))
    .unwrap_err();
    assert!(matches!(
        err,
        ThemeError::Engine(EngineError::InvalidToken { ref token, .. }) if token == "colorPrimary"
    ));
}

#[test]
fn custom_algorithm_failures_name_the_algorithm() {
    init_logging();
    let broken = Algorithm::custom("broken", |_, _| {
        Err(EngineError::Algorithm {
            algorithm: String::new(),
            message: "no palette".into(),
        })
    });
    let err = ThemeManager::from_config(Some(ThemeConfig::new().with_algorithm(broken)))
        .unwrap_err();
    assert!(err.to_string().contains("broken"));
    assert!(err.to_string().contains("no palette"));
}

// ============================================================================
// Providers
// ============================================================================

#[test]
fn mount_before_init_fails() {
    let mut manager = ThemeManager::new();
    let err = manager.mount().unwrap_err();
    assert!(matches!(err, ThemeError::NotInitialized { operation: "mount" }));
}

#[test]
fn mounted_provider_follows_apply() {
    let mut manager = ready(ThemeConfig::new());
    let provider = manager.mount().unwrap();
    let first = provider.cache();

    manager.toggle_dark_mode(true).unwrap();

    assert!(provider.theme().is_dark());
    assert_ne!(provider.cache(), first);
    // providers see the effective config, brand colors included
    assert_eq!(provider.config().tokens()["colorBorder"], json!("#5e4ef9"));
}

#[test]
fn only_the_last_mounted_provider_updates() {
    let mut manager = ready(ThemeConfig::new());
    let first = manager.mount().unwrap();
    let second = manager.mount().unwrap();

    manager.toggle_dark_mode(true).unwrap();

    assert!(!first.theme().is_dark());
    assert!(second.theme().is_dark());
}

#[test]
fn sink_replaces_provider() {
    let mut manager = ready(ThemeConfig::new());
    let provider = manager.mount().unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = Rc::clone(&seen);
        manager.set_sink(move |snapshot: ThemeSnapshot| {
            seen.borrow_mut().push(snapshot.theme.is_dark())
        });
    }
    manager.toggle_dark_mode(true).unwrap();

    assert_eq!(*seen.borrow(), vec![true]);
    assert!(!provider.theme().is_dark());
}

#[test]
fn provider_tree_nests_in_order() {
    let mut manager = ready(ThemeConfig::new().with_algorithm(Algorithm::Dark));
    let provider = manager.mount().unwrap();
    let tree = provider.render(String::from("explore view"));

    assert_eq!(
        tree.layers(),
        [
            ProviderLayer::StyleCache,
            ProviderLayer::ThemeValue,
            ProviderLayer::GlobalStyles,
            ProviderLayer::LibraryConfig,
        ]
    );
    assert!(tree.theme().is_dark());
    assert!(tree.config().is_dark());
    assert!(tree.global_styles().css().starts_with("body {"));
    assert_eq!(tree.children(), "explore view");
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn load_and_reload_yaml_file() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("brand.yaml");
    fs::write(&path, "algorithm: default\ntoken:\n  colorPrimary: \"#123456\"\n").unwrap();

    let mut manager = ThemeManager::new();
    manager.load_file(&path).unwrap();
    assert_eq!(manager.source().unwrap().name(), Some("brand"));
    assert_eq!(
        manager.theme().unwrap().get_str("colorPrimary"),
        Some("#123456")
    );

    fs::write(&path, "algorithm: [dark, compact]\n").unwrap();
    manager.reload().unwrap();
    assert!(manager.theme().unwrap().is_dark());

    fs::write(&path, "algorithm: [midnight]\n").unwrap();
    assert!(manager.reload().is_err());
    assert!(manager.theme().unwrap().is_dark());
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("brand.toml");
    fs::write(&path, "").unwrap();

    let mut manager = ThemeManager::new();
    assert!(matches!(
        manager.load_file(&path),
        Err(ThemeError::Config(ConfigError::UnsupportedFormat { .. }))
    ));
}

// ============================================================================
// System preference
// ============================================================================

#[test]
#[serial]
fn system_preference_selects_variant() {
    set_theme_detector(|| ColorMode::Dark);
    let manager = ThemeManager::from_system_preference().unwrap();
    assert!(manager.theme().unwrap().is_dark());

    set_theme_detector(|| ColorMode::Light);
    let manager = ThemeManager::from_system_preference().unwrap();
    assert!(!manager.theme().unwrap().is_dark());
}
