use std::str::FromStr;

use thiserror::Error;

pub const THEME_KEY: &str = "theme";
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Colour scheme written to the root `data-theme` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown theme `{0}`")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [Self::Light, Self::Dark]
            .into_iter()
            .find(|theme| theme.as_str() == value)
            .ok_or_else(|| UnknownTheme(value.to_string()))
    }
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        if self.is_dark() {
            "dark"
        } else {
            "light"
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn toggled(self) -> Self {
        if self.is_dark() {
            Self::Light
        } else {
            Self::Dark
        }
    }

    /// Accessible name of the toggle: it announces the theme a click selects.
    pub fn toggle_label(self) -> &'static str {
        if self.is_dark() {
            "Switch to light theme"
        } else {
            "Switch to dark theme"
        }
    }

    /// Font Awesome glyph shown inside the toggle.
    pub fn icon_class(self) -> &'static str {
        if self.is_dark() {
            "fas fa-moon"
        } else {
            "fas fa-sun"
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("preference storage is unavailable")]
    Unavailable,
    #[error("failed to read preference `{0}`")]
    Read(String),
    #[error("failed to write preference `{0}`")]
    Write(String),
}

/// Durable per-origin key-value store holding user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Stored preference first, then the OS dark-mode signal, then light.
pub fn resolve_theme(stored: Option<&str>, system_prefers_dark: bool) -> Theme {
    match stored.map(str::parse::<Theme>) {
        Some(Ok(theme)) => theme,
        _ if system_prefers_dark => Theme::Dark,
        _ => Theme::Light,
    }
}

/// Never fails: an unreadable store behaves like an empty one.
pub fn load_theme(store: &dyn PreferenceStore, system_prefers_dark: bool) -> Theme {
    let stored = store.get(THEME_KEY).ok().flatten();
    resolve_theme(stored.as_deref(), system_prefers_dark)
}

pub fn save_theme(store: &dyn PreferenceStore, theme: Theme) -> Result<(), StoreError> {
    store.set(THEME_KEY, theme.as_str())
}
