//! Game settings and preferences
//!
//! Persisted as JSON next to the points ledger.

use serde::{Deserialize, Serialize};

use crate::consts::{INMATES_ENDPOINT, SETTINGS_KEY};
use crate::storage::{KeyValueStore, load_json, save_json};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the inmate roster is fetched from
    pub inmates_endpoint: String,
    /// Vibrate on results (mobile)
    pub haptics: bool,
    /// How long toasts stay on screen
    pub toast_duration_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            inmates_endpoint: INMATES_ENDPOINT.to_string(),
            haptics: true,
            toast_duration_ms: 4000,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match load_json(store, SETTINGS_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from storage");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        match save_json(store, SETTINGS_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_defaults_when_empty() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            inmates_endpoint: "https://example.test/inmates".to_string(),
            haptics: false,
            toast_duration_ms: 1500,
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let mut store = MemoryStore::new();
        store.set(SETTINGS_KEY, r#"{"haptics":false}"#).unwrap();
        let settings = Settings::load(&store);
        assert!(!settings.haptics);
        assert_eq!(settings.inmates_endpoint, INMATES_ENDPOINT);
        assert_eq!(settings.toast_duration_ms, 4000);
    }

    #[test]
    fn test_corrupt_settings_fall_back() {
        let mut store = MemoryStore::new();
        store.set(SETTINGS_KEY, "{not json").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
