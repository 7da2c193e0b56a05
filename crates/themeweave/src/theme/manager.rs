use std::fmt;
use std::path::Path;
use std::rc::Rc;

use crate::algorithm::{Algorithm, AlgorithmRegistry, AlgorithmSelector, DerivationAlgorithm};
use crate::config::{ConfigSource, SerializableThemeConfig, ThemeConfig};
use crate::engine::{DesignTokenEngine, TokenEngine};
use crate::error::{ConfigError, Result, ThemeError};
use crate::provider::{PresentationSink, StyleCache, ThemeProvider, ThemeSnapshot};
use crate::token::{default_tokens, filter_allowed, layered, variant_tokens};

use super::adaptive::detect_color_mode;
use super::resolved::ResolvedTheme;

/// Lifecycle of a [`ThemeManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeState {
    /// No configuration has been applied successfully yet.
    Uninitialized,
    /// A resolved theme is available.
    Ready,
}

struct Current {
    theme: Rc<ResolvedTheme>,
    /// Caller configuration, normalized, before brand tokens are merged in.
    config: ThemeConfig,
    /// What the engine received.
    effective: ThemeConfig,
}

/// Owns the current theme and republishes it on every apply.
///
/// # Example
///
/// ```rust
/// use themeweave::{ThemeConfig, ThemeManager};
///
/// let mut manager = ThemeManager::from_config(Some(
///     ThemeConfig::new().with_token("colorPrimary", "#123456"),
/// ))
/// .unwrap();
///
/// let theme = manager.theme().unwrap();
/// assert_eq!(theme.get_str("colorPrimary"), Some("#123456"));
/// assert_eq!(theme.get_str("colorBorder"), Some("#d1aaf2"));
///
/// manager.toggle_dark_mode(true).unwrap();
/// assert!(manager.theme().unwrap().is_dark());
/// ```
pub struct ThemeManager {
    engine: Box<dyn TokenEngine>,
    registry: AlgorithmRegistry,
    current: Option<Current>,
    sink: Option<Box<dyn PresentationSink>>,
    generation: u64,
    source: Option<ConfigSource>,
}

impl ThemeManager {
    /// An uninitialized manager using the built-in engine.
    pub fn new() -> Self {
        Self::with_engine(DesignTokenEngine::new())
    }

    /// An uninitialized manager using `engine`.
    pub fn with_engine(engine: impl TokenEngine + 'static) -> Self {
        ThemeManager {
            engine: Box::new(engine),
            registry: AlgorithmRegistry::new(),
            current: None,
            sink: None,
            generation: 0,
            source: None,
        }
    }

    /// Builds a ready manager.
    ///
    /// Caller tokens are layered over the application defaults before the
    /// first apply. With the built-in engine this only fails on malformed
    /// token values.
    pub fn from_config(config: Option<ThemeConfig>) -> Result<Self> {
        let mut manager = Self::new();
        manager.apply(with_default_tokens(config))?;
        Ok(manager)
    }

    /// Builds a ready manager whose base algorithm follows the OS color mode.
    pub fn from_system_preference() -> Result<Self> {
        let mode = detect_color_mode();
        log::debug!("system color mode: {:?}", mode);
        Self::from_config(Some(ThemeConfig::new().with_algorithm(mode.algorithm())))
    }

    /// Makes a custom algorithm resolvable by tag in serialized configs.
    pub fn register_algorithm(&mut self, algorithm: Rc<dyn DerivationAlgorithm>) -> Result<()> {
        self.registry.register(algorithm)?;
        Ok(())
    }

    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    pub fn state(&self) -> ThemeState {
        match self.current {
            Some(_) => ThemeState::Ready,
            None => ThemeState::Uninitialized,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.current.is_some()
    }

    /// The current theme, if one has been applied.
    pub fn theme(&self) -> Option<Rc<ResolvedTheme>> {
        self.current.as_ref().map(|current| Rc::clone(&current.theme))
    }

    /// The current normalized configuration.
    pub fn config(&self) -> Option<&ThemeConfig> {
        self.current.as_ref().map(|current| &current.config)
    }

    /// Recomputes the theme from `config` and notifies the sink.
    ///
    /// Tokens resolve, lowest first, as application defaults, the variant
    /// brand palette, caller tokens, then the allow-listed engine output.
    ///
    /// # Errors
    ///
    /// Engine failures propagate unchanged. The previous theme and
    /// configuration are kept when apply fails.
    pub fn apply(&mut self, config: ThemeConfig) -> Result<()> {
        let config = config.normalized();
        let is_dark = config.is_dark();
        let variant = variant_tokens(is_dark);

        let mut effective = config.clone();
        let effective_tokens = layered([default_tokens(), variant, &config.tokens()]);
        effective.token = Some(effective_tokens.clone());

        let computed = self.engine.compute_tokens(&effective)?;
        let filtered = filter_allowed(&computed);
        let theme = Rc::new(ResolvedTheme::assemble(&effective_tokens, &filtered, is_dark));

        log::debug!(
            "applied theme: dark={}, algorithms={:?}, {} caller tokens, {} resolved tokens",
            is_dark,
            config.algorithm.as_ref().map(AlgorithmSelector::tags),
            config.tokens().len(),
            theme.tokens().len()
        );

        self.current = Some(Current {
            theme,
            config,
            effective,
        });
        self.notify();
        Ok(())
    }

    /// Resolves algorithm tags through the registry, then applies.
    pub fn apply_serialized(&mut self, config: &SerializableThemeConfig) -> Result<()> {
        let config = config.normalize(&self.registry)?;
        self.apply(config)
    }

    /// Loads a `.json`, `.yaml` or `.yml` config file and applies it.
    ///
    /// The path is remembered for [`reload`](Self::reload).
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let source = ConfigSource::load(path)?;
        self.apply_serialized(source.config())?;
        self.source = Some(source);
        Ok(())
    }

    /// Re-reads the file given to [`load_file`](Self::load_file) and applies it.
    pub fn reload(&mut self) -> Result<()> {
        let mut source = self.source.take().ok_or(ConfigError::NoSource)?;
        let result = source
            .refresh()
            .map_err(ThemeError::from)
            .and_then(|()| self.apply_serialized(source.config()));
        self.source = Some(source);
        result
    }

    /// The file the current configuration was loaded from.
    pub fn source(&self) -> Option<&ConfigSource> {
        self.source.as_ref()
    }

    /// Switches between the dark and light base algorithm, then applies.
    ///
    /// A list selector keeps its other algorithms in order, with the new base
    /// algorithm first. A single or missing selector is replaced. Works on an
    /// uninitialized manager, starting from an empty configuration.
    pub fn toggle_dark_mode(&mut self, is_dark: bool) -> Result<()> {
        let mut config = self.config().cloned().unwrap_or_default();
        config.algorithm = Some(match config.algorithm.take() {
            Some(selector) => selector.with_dark_mode(is_dark),
            None => AlgorithmSelector::Single(if is_dark {
                Algorithm::Dark
            } else {
                Algorithm::Default
            }),
        });
        self.apply(config)
    }

    /// The current configuration with algorithms replaced by string tags.
    ///
    /// Only caller tokens are exported. The light or dark brand palette
    /// (`colorBorder`, `colorBgElevated` and the rest) is merged in on every
    /// apply and left out here, so a re-applied export follows the toggled
    /// variant. The effective configuration, palette included, reaches
    /// providers and sinks through [`ThemeSnapshot::config`].
    pub fn export_config(&self) -> Result<SerializableThemeConfig> {
        self.current
            .as_ref()
            .map(|current| current.config.to_serializable())
            .ok_or(ThemeError::NotInitialized {
                operation: "export_config",
            })
    }

    /// [`export_config`](Self::export_config) as JSON, indented by two spaces.
    pub fn to_json(&self) -> Result<String> {
        Ok(self.export_config()?.to_json_pretty()?)
    }

    /// [`export_config`](Self::export_config) as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(self.export_config()?.to_yaml()?)
    }

    /// Mounts a provider that follows every later apply.
    ///
    /// The provider takes over the single notification slot: a previously
    /// mounted provider or installed sink stops receiving updates.
    ///
    /// # Errors
    ///
    /// [`ThemeError::NotInitialized`] before the first successful apply.
    pub fn mount(&mut self) -> Result<ThemeProvider> {
        let snapshot = self.snapshot().ok_or(ThemeError::NotInitialized {
            operation: "mount",
        })?;
        let (provider, sink) = ThemeProvider::mount(snapshot);
        self.sink = Some(Box::new(sink));
        Ok(provider)
    }

    /// Installs `sink` in the notification slot, replacing any provider.
    pub fn set_sink(&mut self, sink: impl PresentationSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Empties the notification slot.
    pub fn clear_sink(&mut self) {
        self.sink = None;
    }

    fn snapshot(&mut self) -> Option<ThemeSnapshot> {
        let current = self.current.as_ref()?;
        self.generation += 1;
        Some(ThemeSnapshot {
            theme: Rc::clone(&current.theme),
            config: current.effective.clone(),
            cache: StyleCache::new(self.generation),
        })
    }

    fn notify(&mut self) {
        if self.sink.is_none() {
            return;
        }
        if let Some(snapshot) = self.snapshot() {
            log::trace!("notifying sink, style cache {}", snapshot.cache.scope());
            if let Some(sink) = self.sink.as_mut() {
                sink.notify(snapshot);
            }
        }
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ThemeManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeManager")
            .field("state", &self.state())
            .field("registry", &self.registry)
            .field("has_sink", &self.sink.is_some())
            .field("generation", &self.generation)
            .finish()
    }
}

/// Copies `config` and layers its tokens over the application defaults.
fn with_default_tokens(config: Option<ThemeConfig>) -> ThemeConfig {
    let mut config = config.unwrap_or_default();
    let caller = config.token.take().unwrap_or_default();
    config.token = Some(layered([default_tokens(), &caller]));
    config
}
