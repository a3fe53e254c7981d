//! User preferences persisted alongside the selection stores.
//!
//! Currently a single light/dark theme flag, stored under its own key
//! through the same backend machinery.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::storage::StorageBackend;

/// Color theme flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// The other theme.
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Preference payload persisted as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Preferences {
    pub theme: Theme,
}

/// Persisted preference store.
///
/// Reads its record once at construction and writes best-effort on every
/// change; an unreadable or missing record falls back to defaults.
pub struct PreferenceStore {
    key: String,
    backend: Arc<dyn StorageBackend>,
    prefs: Mutex<Preferences>,
}

impl PreferenceStore {
    /// Open the store under `key`.
    pub fn open(key: impl Into<String>, backend: Arc<dyn StorageBackend>) -> Self {
        let key = key.into();
        let prefs = match backend.load(&key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(prefs) => {
                    log::info!("loaded preferences under {key:?}");
                    prefs
                }
                Err(e) => {
                    log::warn!("unreadable preferences under {key:?}, using defaults: {e}");
                    Preferences::default()
                }
            },
            Ok(None) => {
                log::info!("no preferences under {key:?}, using defaults");
                Preferences::default()
            }
            Err(e) => {
                log::warn!("failed to load preferences under {key:?}, using defaults: {e}");
                Preferences::default()
            }
        };
        Self {
            key,
            backend,
            prefs: Mutex::new(prefs),
        }
    }

    pub fn theme(&self) -> Theme {
        self.prefs.lock().theme
    }

    /// Set the theme; no-op when it is already active.
    pub fn set_theme(&self, theme: Theme) {
        let mut prefs = self.prefs.lock();
        if prefs.theme == theme {
            return;
        }
        prefs.theme = theme;
        self.save(&prefs);
    }

    /// Flip between light and dark, returning the new theme.
    pub fn toggle_theme(&self) -> Theme {
        let mut prefs = self.prefs.lock();
        prefs.theme = prefs.theme.toggled();
        self.save(&prefs);
        prefs.theme
    }

    fn save(&self, prefs: &Preferences) {
        let saved = serde_json::to_string(prefs)
            .map_err(StorageError::from)
            .and_then(|raw| self.backend.save(&self.key, &raw));
        match saved {
            Ok(()) => log::debug!("preferences saved under {:?}", self.key),
            Err(e) => log::warn!("failed to persist preferences under {:?}: {e}", self.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_defaults_on_first_run() {
        let prefs = PreferenceStore::open("prefs", Arc::new(MemoryStorage::new()));
        assert_eq!(prefs.theme(), Theme::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let backend: Arc<MemoryStorage> = Arc::new(MemoryStorage::new());
        {
            let prefs = PreferenceStore::open("prefs", backend.clone());
            assert_eq!(prefs.toggle_theme(), Theme::Dark);
        }
        let fresh = PreferenceStore::open("prefs", backend);
        assert_eq!(fresh.theme(), Theme::Dark);
    }

    #[test]
    fn test_set_theme_same_value_is_noop() {
        let backend: Arc<MemoryStorage> = Arc::new(MemoryStorage::new());
        let prefs = PreferenceStore::open("prefs", backend.clone());
        prefs.set_theme(Theme::Light);
        // Nothing changed, so nothing was written.
        assert!(backend.is_empty());
        prefs.set_theme(Theme::Dark);
        assert!(!backend.is_empty());
    }

    #[test]
    fn test_unreadable_record_falls_back_to_defaults() {
        let backend = Arc::new(MemoryStorage::new());
        backend.save("prefs", "not json").unwrap();
        let prefs = PreferenceStore::open("prefs", backend);
        assert_eq!(prefs.theme(), Theme::Light);
    }

    #[test]
    fn test_theme_string_round_trip() {
        assert_eq!(Theme::from_str("DARK"), Some(Theme::Dark));
        assert_eq!(Theme::from_str(Theme::Light.as_str()), Some(Theme::Light));
        assert_eq!(Theme::from_str("sepia"), None);
    }
}
