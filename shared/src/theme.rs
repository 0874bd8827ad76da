//! Light/dark theme preference.

use serde::{Deserialize, Serialize};
#[cfg(test)]
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// How long the root keeps its color transition after a toggle
pub const THEME_TRANSITION_MS: u32 = 300;
pub const THEME_TRANSITION: &str = "color 0.3s ease, background-color 0.3s ease";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme: {0}")]
pub struct ThemeParseError(pub String);

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    /// Icon on the toggle button: it offers the opposite theme
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            ThemePreference::Dark => "☀️",
            ThemePreference::Light => "🌙",
        }
    }

    /// Header background once the page has been scrolled
    pub fn header_background(&self) -> &'static str {
        match self {
            ThemePreference::Dark => "rgba(31, 33, 33, 0.95)",
            ThemePreference::Light => "rgba(252, 252, 249, 0.95)",
        }
    }

    /// Saved value wins, then the OS preference, then light
    pub fn resolve(saved: Option<&str>, prefers_dark: bool) -> Self {
        match saved.and_then(|value| value.parse().ok()) {
            Some(theme) => theme,
            None if prefers_dark => ThemePreference::Dark,
            None => ThemePreference::Light,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            other => Err(ThemeParseError(other.to_string())),
        }
    }
}

/// Key/value persistence for user preferences
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str);
}

/// In-memory store for tests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

#[cfg(test)]
impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// The persisted theme; the single source of truth for root styling
#[derive(Debug)]
pub struct ThemeStore<S> {
    store: S,
    key: String,
    current: ThemePreference,
}

impl<S: PreferenceStore> ThemeStore<S> {
    /// Loads the saved preference, falling back to the OS dark-mode flag
    pub fn load(store: S, key: impl Into<String>, prefers_dark: bool) -> Self {
        let key = key.into();
        let saved = store.load(&key);
        let current = ThemePreference::resolve(saved.as_deref(), prefers_dark);
        Self {
            store,
            key,
            current,
        }
    }

    pub fn current(&self) -> ThemePreference {
        self.current
    }

    /// Flips and persists the preference
    pub fn toggle(&mut self) -> ThemePreference {
        self.current = self.current.toggled();
        self.store.save(&self.key, self.current.as_str());
        self.current
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(theme: &str) -> MemoryStore {
        let mut store = MemoryStore::default();
        store.save("theme", theme);
        store
    }

    #[test]
    fn test_resolve_order() {
        assert_eq!(ThemePreference::resolve(Some("dark"), false), ThemePreference::Dark);
        assert_eq!(ThemePreference::resolve(Some("light"), true), ThemePreference::Light);
        assert_eq!(ThemePreference::resolve(None, true), ThemePreference::Dark);
        assert_eq!(ThemePreference::resolve(None, false), ThemePreference::Light);
        // garbage in storage behaves like no value
        assert_eq!(ThemePreference::resolve(Some("sepia"), true), ThemePreference::Dark);
    }

    #[test]
    fn test_toggle_persists() {
        let mut themes = ThemeStore::load(store_with("light"), "theme", false);
        assert_eq!(themes.toggle(), ThemePreference::Dark);
        assert_eq!(themes.store().load("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_toggle_twice_restores_initial_theme() {
        let mut themes = ThemeStore::load(store_with("dark"), "theme", false);
        themes.toggle();
        themes.toggle();
        assert_eq!(themes.current(), ThemePreference::Dark);
        assert_eq!(themes.store().load("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_icons_and_header_colors() {
        assert_eq!(ThemePreference::Dark.toggle_icon(), "☀️");
        assert_eq!(ThemePreference::Light.toggle_icon(), "🌙");
        assert_eq!(ThemePreference::Dark.header_background(), "rgba(31, 33, 33, 0.95)");
        assert_eq!(ThemePreference::Light.header_background(), "rgba(252, 252, 249, 0.95)");
    }
}
