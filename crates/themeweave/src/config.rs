//! Theme configuration: the caller-facing input shape and its serialized form.
//!
//! [`ThemeConfig`] is what the manager consumes. Its algorithm selector may
//! hold runtime values (custom algorithms), so it is not itself serializable.
//! [`SerializableThemeConfig`] mirrors it with algorithms replaced by string
//! tags, and is what gets written to and read from JSON/YAML.
//!
//! ## Shape
//!
//! ```json
//! {
//!   "algorithm": ["dark", "compact"],
//!   "token": { "colorPrimary": "#123456" },
//!   "components": { "Button": { "borderRadius": 2 } },
//!   "hashed": false
//! }
//! ```
//!
//! `algorithm` is a single tag or a list; `token` and `components` are
//! free-form mappings. Any other top-level field is preserved in `extra` and
//! handed to the token engine untouched.
//!
//! ## Files
//!
//! ```rust,ignore
//! use themeweave::config::ConfigSource;
//!
//! let mut source = ConfigSource::load("./themes/brand.yaml")?;
//! // ... after the file changes on disk
//! source.refresh()?;
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::algorithm::{Algorithm, AlgorithmRegistry, AlgorithmSelector, SerializedAlgorithm};
use crate::error::ConfigError;
use crate::token::TokenMap;

/// File extensions recognized by [`SerializableThemeConfig::from_file`].
pub const CONFIG_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Per-component token overrides, keyed by component name.
pub type ComponentTokens = BTreeMap<String, TokenMap>;

/// Input configuration for [`ThemeManager`](crate::ThemeManager).
///
/// Every field is optional.
///
/// ```rust
/// use themeweave::{Algorithm, ThemeConfig};
///
/// let config = ThemeConfig::new()
///     .with_algorithm(Algorithm::Dark)
///     .with_token("colorPrimary", "#123456");
///
/// assert!(config.is_dark());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeConfig {
    /// Variant selector.
    pub algorithm: Option<AlgorithmSelector>,
    /// Caller token overrides.
    pub token: Option<TokenMap>,
    /// Per-component overrides, passed through to the library config.
    pub components: Option<ComponentTokens>,
    /// Any other engine-understood fields.
    pub extra: Map<String, Value>,
}

impl ThemeConfig {
    /// An empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the algorithm selector.
    pub fn with_algorithm(mut self, selector: impl Into<AlgorithmSelector>) -> Self {
        self.algorithm = Some(selector.into());
        self
    }

    /// Sets one token override.
    pub fn with_token(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.token
            .get_or_insert_with(TokenMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replaces the token overrides.
    pub fn with_tokens(mut self, tokens: TokenMap) -> Self {
        self.token = Some(tokens);
        self
    }

    /// Sets the overrides for one component.
    pub fn with_component(mut self, component: impl Into<String>, tokens: TokenMap) -> Self {
        self.components
            .get_or_insert_with(ComponentTokens::new)
            .insert(component.into(), tokens);
        self
    }

    /// Dark-variant detection.
    pub fn is_dark(&self) -> bool {
        crate::algorithm::is_dark(self.algorithm.as_ref())
    }

    /// The selected algorithms, in application order.
    pub fn algorithms(&self) -> &[Algorithm] {
        self.algorithm
            .as_ref()
            .map(AlgorithmSelector::algorithms)
            .unwrap_or(&[])
    }

    /// A copy shaped the way the token engine expects: `token` always present.
    pub fn normalized(&self) -> ThemeConfig {
        let mut config = self.clone();
        config.token.get_or_insert_with(TokenMap::new);
        config
    }

    /// Caller tokens, empty when unset.
    pub fn tokens(&self) -> TokenMap {
        self.token.clone().unwrap_or_default()
    }

    /// Replaces runtime algorithm values with stable string tags.
    pub fn to_serializable(&self) -> SerializableThemeConfig {
        SerializableThemeConfig {
            algorithm: self.algorithm.as_ref().map(AlgorithmSelector::tags),
            token: self.token.clone(),
            components: self.components.clone(),
            extra: self.extra.clone(),
        }
    }
}

/// Serializable mirror of [`ThemeConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SerializableThemeConfig {
    /// Algorithm tag or list of tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<SerializedAlgorithm>,
    /// Token overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenMap>,
    /// Per-component overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<ComponentTokens>,
    /// Other fields, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SerializableThemeConfig {
    /// Parses JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads a `.json`, `.yaml` or `.yml` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        format.parse(&content)
    }

    /// Renders as JSON with 2-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Renders as YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Resolves algorithm tags through `registry`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownAlgorithm`] when a tag is neither built in nor
    /// registered.
    pub fn normalize(&self, registry: &AlgorithmRegistry) -> Result<ThemeConfig, ConfigError> {
        let algorithm = self
            .algorithm
            .as_ref()
            .map(|serialized| registry.resolve_selector(serialized))
            .transpose()?;

        Ok(ThemeConfig {
            algorithm,
            token: Some(self.token.clone().unwrap_or_default()),
            components: self.components.clone(),
            extra: self.extra.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    fn parse(self, content: &str) -> Result<SerializableThemeConfig, ConfigError> {
        match self {
            Format::Json => SerializableThemeConfig::from_json(content),
            Format::Yaml => SerializableThemeConfig::from_yaml(content),
        }
    }
}

/// A configuration loaded from disk, remembering its path for refresh.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    path: PathBuf,
    config: SerializableThemeConfig,
}

impl ConfigSource {
    /// Loads and parses `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let config = SerializableThemeConfig::from_file(&path)?;
        Ok(Self { path, config })
    }

    /// Source file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Theme name, taken from the file stem.
    pub fn name(&self) -> Option<&str> {
        self.path.file_stem().and_then(|stem| stem.to_str())
    }

    /// The parsed configuration.
    pub fn config(&self) -> &SerializableThemeConfig {
        &self.config
    }

    /// Re-reads the file. On error the previous configuration is kept.
    pub fn refresh(&mut self) -> Result<(), ConfigError> {
        self.config = SerializableThemeConfig::from_file(&self.path)?;
        Ok(())
    }
}
