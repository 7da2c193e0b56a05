//! Publishing resolved themes to presentation code.
//!
//! # Overview
//!
//! The manager keeps exactly one notification slot. Whatever occupies it is
//! told about every successful apply with a [`ThemeSnapshot`]: the new theme,
//! the effective configuration and a fresh [`StyleCache`] handle.
//!
//! Two things can occupy the slot:
//!
//! 1. A [`ThemeProvider`], returned by
//!    [`ThemeManager::mount`](crate::ThemeManager::mount). It always holds the
//!    latest snapshot and wraps presentation content in a [`ProviderTree`].
//! 2. Any [`PresentationSink`], installed with
//!    [`ThemeManager::set_sink`](crate::ThemeManager::set_sink). Closures
//!    taking a snapshot implement the trait.
//!
//! Mounting or installing replaces the previous occupant, so only the most
//! recent one keeps receiving updates. Earlier providers keep the last
//! snapshot they saw.
//!
//! # Example
//!
//! ```rust
//! use themeweave::ThemeManager;
//!
//! let mut manager = ThemeManager::from_config(None).unwrap();
//! let provider = manager.mount().unwrap();
//!
//! manager.toggle_dark_mode(true).unwrap();
//! assert!(provider.theme().is_dark());
//!
//! let tree = provider.render("dashboard");
//! assert_eq!(*tree.children(), "dashboard");
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::config::ThemeConfig;
use crate::theme::ResolvedTheme;

/// Key every style cache handle is scoped under.
pub const STYLE_CACHE_KEY: &str = "themeweave";

/// Handle used by the styling layer to scope generated styles.
///
/// A new handle is created on every apply; handles from different applies
/// never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleCache {
    key: &'static str,
    generation: u64,
}

impl StyleCache {
    pub(crate) fn new(generation: u64) -> Self {
        StyleCache {
            key: STYLE_CACHE_KEY,
            generation,
        }
    }

    pub fn key(&self) -> &str {
        self.key
    }

    /// Which apply produced this handle, counting from 1.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Class-name prefix for styles generated under this handle.
    pub fn scope(&self) -> String {
        format!("{}-{}", self.key, self.generation)
    }
}

/// Everything presentation code needs after an apply.
#[derive(Debug, Clone)]
pub struct ThemeSnapshot {
    /// The theme resolved by this apply.
    pub theme: Rc<ResolvedTheme>,
    /// The configuration handed to the token engine.
    pub config: ThemeConfig,
    /// Style cache handle unique to this apply.
    pub cache: StyleCache,
}

/// Receives a snapshot after every successful apply.
pub trait PresentationSink {
    fn notify(&mut self, snapshot: ThemeSnapshot);
}

impl<F> PresentationSink for F
where
    F: FnMut(ThemeSnapshot),
{
    fn notify(&mut self, snapshot: ThemeSnapshot) {
        (self)(snapshot)
    }
}

/// A mounted subtree's view of the current theme.
///
/// Holds the snapshot that was current at mount time and, while it is the
/// most recently mounted provider, every snapshot after that.
pub struct ThemeProvider {
    state: Rc<RefCell<ThemeSnapshot>>,
}

impl ThemeProvider {
    /// Creates a provider and the sink that feeds it.
    pub(crate) fn mount(snapshot: ThemeSnapshot) -> (Self, ProviderSink) {
        let state = Rc::new(RefCell::new(snapshot));
        let sink = ProviderSink {
            state: Rc::downgrade(&state),
        };
        (ThemeProvider { state }, sink)
    }

    /// The snapshot this provider currently holds.
    pub fn snapshot(&self) -> ThemeSnapshot {
        self.state.borrow().clone()
    }

    pub fn theme(&self) -> Rc<ResolvedTheme> {
        Rc::clone(&self.state.borrow().theme)
    }

    pub fn config(&self) -> ThemeConfig {
        self.state.borrow().config.clone()
    }

    pub fn cache(&self) -> StyleCache {
        self.state.borrow().cache.clone()
    }

    /// Wraps `children` in the provider layers, using the current snapshot.
    pub fn render<C>(&self, children: C) -> ProviderTree<C> {
        let ThemeSnapshot {
            theme,
            config,
            cache,
        } = self.snapshot();
        let global_styles = GlobalStyles::new(&theme);

        StyleCacheProvider {
            cache,
            child: ThemeValueProvider {
                theme,
                global_styles,
                child: LibraryConfigProvider { config, children },
            },
        }
    }
}

impl fmt::Debug for ThemeProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeProvider")
            .field("cache", &self.state.borrow().cache)
            .finish()
    }
}

/// Feeds a mounted [`ThemeProvider`]. Does nothing once the provider is dropped.
pub(crate) struct ProviderSink {
    state: Weak<RefCell<ThemeSnapshot>>,
}

impl PresentationSink for ProviderSink {
    fn notify(&mut self, snapshot: ThemeSnapshot) {
        match self.state.upgrade() {
            Some(state) => *state.borrow_mut() = snapshot,
            None => log::trace!("mounted provider was dropped, snapshot discarded"),
        }
    }
}

/// The provider stack around presentation content, style cache outermost.
pub type ProviderTree<C> = StyleCacheProvider<ThemeValueProvider<LibraryConfigProvider<C>>>;

/// Names of the provider layers, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderLayer {
    StyleCache,
    ThemeValue,
    GlobalStyles,
    LibraryConfig,
}

/// Scopes generated styles to one [`StyleCache`].
#[derive(Debug, Clone)]
pub struct StyleCacheProvider<T> {
    pub cache: StyleCache,
    pub child: T,
}

/// Publishes the resolved theme. Global styles are injected first, then the
/// library configuration layer.
#[derive(Debug, Clone)]
pub struct ThemeValueProvider<T> {
    pub theme: Rc<ResolvedTheme>,
    pub global_styles: GlobalStyles,
    pub child: T,
}

/// Hands the effective configuration to the component library.
#[derive(Debug, Clone)]
pub struct LibraryConfigProvider<C> {
    pub config: ThemeConfig,
    pub children: C,
}

impl<C> ProviderTree<C> {
    /// Layer order, outermost first.
    pub fn layers(&self) -> [ProviderLayer; 4] {
        [
            ProviderLayer::StyleCache,
            ProviderLayer::ThemeValue,
            ProviderLayer::GlobalStyles,
            ProviderLayer::LibraryConfig,
        ]
    }

    pub fn theme(&self) -> &ResolvedTheme {
        &self.child.theme
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.child.child.config
    }

    pub fn global_styles(&self) -> &GlobalStyles {
        &self.child.global_styles
    }

    /// The wrapped presentation content.
    pub fn children(&self) -> &C {
        &self.child.child.children
    }

    pub fn into_children(self) -> C {
        self.child.child.children
    }
}

/// Document-wide styles derived from a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalStyles {
    css: String,
}

impl GlobalStyles {
    pub fn new(theme: &ResolvedTheme) -> Self {
        GlobalStyles { css: global_css(theme) }
    }

    /// The stylesheet text.
    pub fn css(&self) -> &str {
        &self.css
    }
}

fn global_css(theme: &ResolvedTheme) -> String {
    let mut css = String::new();

    let mut rule = |selector: &str, declarations: &[(&str, Option<String>)]| {
        let body: Vec<String> = declarations
            .iter()
            .filter_map(|(property, value)| {
                value
                    .as_ref()
                    .map(|value| format!("  {}: {};", property, value))
            })
            .collect();
        if body.is_empty() {
            return;
        }
        css.push_str(selector);
        css.push_str(" {\n");
        css.push_str(&body.join("\n"));
        css.push_str("\n}\n");
    };

    let text = |name: &str| theme.get_str(name).map(str::to_string);
    let px = |name: &str| theme.get_f64(name).map(|value| format!("{}px", value));
    let seconds = |name: &str| theme.get_f64(name).map(|value| format!("{}s", value));

    rule(
        "body",
        &[
            ("font-family", text("fontFamily")),
            ("font-size", px("fontSize")),
            ("color", text("colorText")),
            ("background-color", text("colorBgBase")),
        ],
    );
    rule(
        "code, pre",
        &[("font-family", text("fontFamilyCode"))],
    );
    rule(
        "a",
        &[
            ("color", text("colorLink")),
            (
                "transition",
                seconds("transitionTiming").map(|timing| format!("color {}", timing)),
            ),
        ],
    );
    rule("a:hover", &[("color", text("colorLinkHover"))]);
    rule(
        "::selection",
        &[("background-color", text("colorPrimaryBg"))],
    );

    css
}
