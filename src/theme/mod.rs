//! Theme preference model and resolution.
//!
//! A user states a [`ThemePreference`] (light, dark or "follow the system").
//! The page renders an [`EffectiveTheme`], which is always derived from the
//! stored preference and the operating system's color-scheme signal by
//! [`resolve`]. Persistence lives in [`store`], the page-lifetime state
//! machine in [`controller`], and the system signal plumbing in [`scheme`].

pub mod controller;
pub mod scheme;
pub mod store;

use std::fmt;

pub use controller::{
    mount, NullSurface, SharedThemeController, ThemeController, ThemeSnapshot, ThemeSurface,
    ToggleOption,
};
pub use scheme::{ColorSchemeSource, ManualColorScheme, Subscription};
pub use store::{MemoryChannel, StorageChannel, StoreError, ThemeStore};

/// Key used for the preference in both the durable store and the cookie mirror.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Class toggled on the document root while the dark theme is in effect.
pub const DARK_CLASS: &str = "dark";

/// Attribute on the document root carrying the effective theme literal.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Media query whose match state is the system signal.
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// What the user asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    /// Toggle order: light, system, dark.
    pub const ALL: [ThemePreference; 3] = [
        ThemePreference::Light,
        ThemePreference::System,
        ThemePreference::Dark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }

    /// Parse a stored literal. Anything unexpected is treated as "no choice".
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            "system" => Some(ThemePreference::System),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemePreference::Light => "Light",
            ThemePreference::Dark => "Dark",
            ThemePreference::System => "System",
        }
    }

    /// Glyph used by the compact toggle.
    pub fn icon(&self) -> &'static str {
        match self {
            ThemePreference::Light => "\u{2600}",
            ThemePreference::Dark => "\u{263E}",
            ThemePreference::System => "\u{25D0}",
        }
    }

    /// The concrete theme this preference pins, if it pins one.
    pub fn explicit(self) -> Option<EffectiveTheme> {
        match self {
            ThemePreference::Light => Some(EffectiveTheme::Light),
            ThemePreference::Dark => Some(EffectiveTheme::Dark),
            ThemePreference::System => None,
        }
    }

    /// Whether the effective theme follows the system signal.
    pub fn follows_system(self) -> bool {
        self == ThemePreference::System
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the document actually renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectiveTheme {
    Light,
    Dark,
}

impl EffectiveTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectiveTheme::Light => "light",
            EffectiveTheme::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == EffectiveTheme::Dark
    }

    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            EffectiveTheme::Dark
        } else {
            EffectiveTheme::Light
        }
    }

    /// The preference that pins this theme.
    pub fn as_preference(self) -> ThemePreference {
        match self {
            EffectiveTheme::Light => ThemePreference::Light,
            EffectiveTheme::Dark => ThemePreference::Dark,
        }
    }
}

impl fmt::Display for EffectiveTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a stored preference (possibly absent) and the system signal to the
/// theme to render. Absence behaves exactly like [`ThemePreference::System`].
pub fn resolve(pref: Option<ThemePreference>, system_is_dark: bool) -> EffectiveTheme {
    pref.and_then(ThemePreference::explicit)
        .unwrap_or_else(|| EffectiveTheme::from_dark(system_is_dark))
}
