//! Variant selectors: which derivation algorithms a configuration asks for.
//!
//! An [`Algorithm`] names a token-derivation strategy. Three are built in
//! (`default`, `dark`, `compact`); applications can add their own as
//! [`Algorithm::Custom`] values wrapping a [`DerivationAlgorithm`].
//!
//! A configuration selects one algorithm or an ordered list of them
//! ([`AlgorithmSelector`]). Lists compose left to right: each algorithm sees
//! the map produced by the one before it.
//!
//! ## Runtime values vs. tags
//!
//! Custom algorithms are runtime values and cannot be serialized. When a
//! configuration is exported, every algorithm is replaced by its stable string
//! tag ([`SerializedAlgorithm`]); an [`AlgorithmRegistry`] maps tags back to
//! algorithms when a serialized configuration is applied again.
//!
//! ```rust
//! use themeweave::algorithm::{Algorithm, AlgorithmSelector};
//!
//! let selector = AlgorithmSelector::List(vec![Algorithm::Compact, Algorithm::Default]);
//! assert!(!selector.is_dark());
//!
//! let dark = selector.with_dark_mode(true);
//! assert_eq!(dark.tags().to_vec(), vec!["dark", "compact"]);
//! assert!(dark.is_dark());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, EngineError};
use crate::token::TokenMap;

/// Tag of the built-in light algorithm.
pub const DEFAULT_TAG: &str = "default";
/// Tag of the built-in dark algorithm.
pub const DARK_TAG: &str = "dark";
/// Tag of the built-in compact algorithm.
pub const COMPACT_TAG: &str = "compact";

/// A token-derivation strategy supplied at runtime.
///
/// `derive` receives the validated seed tokens and, when this algorithm is
/// not first in the list, the map produced by the previous algorithm. It
/// returns the complete map for the next stage.
pub trait DerivationAlgorithm {
    /// Stable tag used when the configuration is serialized.
    fn name(&self) -> &str;

    /// Produces map tokens from seed tokens.
    fn derive(&self, seed: &TokenMap, prior: Option<&TokenMap>) -> Result<TokenMap, EngineError>;
}

struct FnAlgorithm<F> {
    name: String,
    derive: F,
}

impl<F> DerivationAlgorithm for FnAlgorithm<F>
where
    F: Fn(&TokenMap, Option<&TokenMap>) -> Result<TokenMap, EngineError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn derive(&self, seed: &TokenMap, prior: Option<&TokenMap>) -> Result<TokenMap, EngineError> {
        (self.derive)(seed, prior)
    }
}

/// One derivation algorithm identifier.
#[derive(Clone)]
pub enum Algorithm {
    /// Light palette, standard sizes.
    Default,
    /// Dark palette.
    Dark,
    /// Tighter sizes, applied on top of the previous map.
    Compact,
    /// Application-supplied algorithm.
    Custom(Rc<dyn DerivationAlgorithm>),
}

impl Algorithm {
    /// Wraps a closure as a named custom algorithm.
    pub fn custom<F>(name: impl Into<String>, derive: F) -> Self
    where
        F: Fn(&TokenMap, Option<&TokenMap>) -> Result<TokenMap, EngineError> + 'static,
    {
        Algorithm::Custom(Rc::new(FnAlgorithm {
            name: name.into(),
            derive,
        }))
    }

    /// The stable string tag for this algorithm.
    pub fn tag(&self) -> &str {
        match self {
            Algorithm::Default => DEFAULT_TAG,
            Algorithm::Dark => DARK_TAG,
            Algorithm::Compact => COMPACT_TAG,
            Algorithm::Custom(custom) => custom.name(),
        }
    }

    /// Resolves a built-in tag.
    pub fn builtin(tag: &str) -> Option<Self> {
        match tag {
            DEFAULT_TAG => Some(Algorithm::Default),
            DARK_TAG => Some(Algorithm::Dark),
            COMPACT_TAG => Some(Algorithm::Compact),
            _ => None,
        }
    }

    /// True for the light/dark base algorithms that dark-mode toggling replaces.
    pub fn is_base_variant(&self) -> bool {
        matches!(self, Algorithm::Default | Algorithm::Dark)
    }
}

impl PartialEq for Algorithm {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Algorithm::Default, Algorithm::Default)
            | (Algorithm::Dark, Algorithm::Dark)
            | (Algorithm::Compact, Algorithm::Compact) => true,
            (Algorithm::Custom(a), Algorithm::Custom(b)) => {
                Rc::ptr_eq(a, b) || a.name() == b.name()
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Custom(custom) => write!(f, "Custom({:?})", custom.name()),
            builtin => write!(f, "{}", builtin.tag()),
        }
    }
}

/// Which algorithm(s) a configuration selects.
#[derive(Debug, Clone, PartialEq)]
pub enum AlgorithmSelector {
    /// One algorithm.
    Single(Algorithm),
    /// An ordered list, composed left to right.
    List(Vec<Algorithm>),
}

impl AlgorithmSelector {
    /// The selected algorithms in application order.
    pub fn algorithms(&self) -> &[Algorithm] {
        match self {
            AlgorithmSelector::Single(algorithm) => std::slice::from_ref(algorithm),
            AlgorithmSelector::List(algorithms) => algorithms,
        }
    }

    /// True when the selector is the dark algorithm, or a list containing it.
    pub fn is_dark(&self) -> bool {
        self.algorithms().contains(&Algorithm::Dark)
    }

    /// Rewrites the light/dark part of the selector.
    ///
    /// A list loses any `default`/`dark` entries and gets the new base
    /// algorithm prepended; the other entries keep their order. A single
    /// algorithm is replaced outright.
    pub fn with_dark_mode(self, is_dark: bool) -> Self {
        let base = if is_dark {
            Algorithm::Dark
        } else {
            Algorithm::Default
        };
        match self {
            AlgorithmSelector::List(algorithms) => {
                let mut rewritten = Vec::with_capacity(algorithms.len() + 1);
                rewritten.push(base);
                rewritten.extend(algorithms.into_iter().filter(|a| !a.is_base_variant()));
                AlgorithmSelector::List(rewritten)
            }
            AlgorithmSelector::Single(_) => AlgorithmSelector::Single(base),
        }
    }

    /// Replaces runtime values with their string tags.
    pub fn tags(&self) -> SerializedAlgorithm {
        match self {
            AlgorithmSelector::Single(algorithm) => {
                SerializedAlgorithm::Single(algorithm.tag().to_string())
            }
            AlgorithmSelector::List(algorithms) => SerializedAlgorithm::List(
                algorithms.iter().map(|a| a.tag().to_string()).collect(),
            ),
        }
    }
}

impl From<Algorithm> for AlgorithmSelector {
    fn from(algorithm: Algorithm) -> Self {
        AlgorithmSelector::Single(algorithm)
    }
}

impl From<Vec<Algorithm>> for AlgorithmSelector {
    fn from(algorithms: Vec<Algorithm>) -> Self {
        AlgorithmSelector::List(algorithms)
    }
}

/// Dark-variant detection for an optional selector; no selector means light.
pub fn is_dark(selector: Option<&AlgorithmSelector>) -> bool {
    selector.is_some_and(AlgorithmSelector::is_dark)
}

/// Serializable form of an [`AlgorithmSelector`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SerializedAlgorithm {
    /// `"dark"`
    Single(String),
    /// `["dark", "compact"]`
    List(Vec<String>),
}

impl SerializedAlgorithm {
    /// All tags in order.
    pub fn to_vec(&self) -> Vec<&str> {
        match self {
            SerializedAlgorithm::Single(tag) => vec![tag.as_str()],
            SerializedAlgorithm::List(tags) => tags.iter().map(String::as_str).collect(),
        }
    }
}

/// Maps serialized tags back to algorithms.
///
/// Built-in tags always resolve; custom algorithms must be registered first.
#[derive(Clone, Default)]
pub struct AlgorithmRegistry {
    custom: BTreeMap<String, Algorithm>,
}

impl AlgorithmRegistry {
    /// Creates a registry that knows only the built-in algorithms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a custom algorithm under its own tag.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError::DuplicateAlgorithm`] when the tag belongs to a
    /// built-in or was already registered.
    pub fn register(&mut self, algorithm: Rc<dyn DerivationAlgorithm>) -> Result<(), ConfigError> {
        let name = algorithm.name().to_string();
        if Algorithm::builtin(&name).is_some() || self.custom.contains_key(&name) {
            return Err(ConfigError::DuplicateAlgorithm(name));
        }
        self.custom.insert(name, Algorithm::Custom(algorithm));
        Ok(())
    }

    /// Resolves one tag.
    pub fn resolve(&self, tag: &str) -> Result<Algorithm, ConfigError> {
        Algorithm::builtin(tag)
            .or_else(|| self.custom.get(tag).cloned())
            .ok_or_else(|| ConfigError::UnknownAlgorithm(tag.to_string()))
    }

    /// Resolves a serialized selector, keeping its single/list shape.
    pub fn resolve_selector(
        &self,
        serialized: &SerializedAlgorithm,
    ) -> Result<AlgorithmSelector, ConfigError> {
        Ok(match serialized {
            SerializedAlgorithm::Single(tag) => AlgorithmSelector::Single(self.resolve(tag)?),
            SerializedAlgorithm::List(tags) => AlgorithmSelector::List(
                tags.iter()
                    .map(|tag| self.resolve(tag))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }

    /// Registered custom tags.
    pub fn custom_names(&self) -> impl Iterator<Item = &str> {
        self.custom.keys().map(String::as_str)
    }
}

impl fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmRegistry")
            .field("custom", &self.custom.keys().collect::<Vec<_>>())
            .finish()
    }
}
