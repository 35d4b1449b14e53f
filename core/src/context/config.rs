//! Configuration persistence
//!
//! The on-disk format is delegated to confy (TOML). The session only talks to
//! the [`Persistence`] trait so tests can swap in [`MemoryStore`].

use std::path::PathBuf;

use zonenotes_types::NotesConfig;

use super::ConfigError;

pub const APP_NAME: &str = "zonenotes";
pub const CONFIG_NAME: &str = "config";

/// Load/save backend for [`NotesConfig`].
pub trait Persistence {
    fn load(&self) -> Result<NotesConfig, ConfigError>;
    fn save(&mut self, config: &NotesConfig) -> Result<(), ConfigError>;
}

/// Load a config from `persistence`, falling back to defaults on failure.
///
/// Loaded data is normalized so every stored zone satisfies the note invariants.
pub fn load_or_default(persistence: &impl Persistence) -> NotesConfig {
    let mut config = match persistence.load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load configuration, using defaults");
            NotesConfig::default()
        }
    };

    let repaired = config.normalize();
    if repaired > 0 {
        tracing::warn!(repaired, "Repaired invalid zone settings in configuration");
    }
    config
}

/// confy-backed store under the platform config directory.
#[derive(Debug, Clone)]
pub struct ConfyStore {
    app_name: String,
    config_name: String,
}

impl Default for ConfyStore {
    fn default() -> Self {
        Self::new(APP_NAME, CONFIG_NAME)
    }
}

impl ConfyStore {
    pub fn new(app_name: impl Into<String>, config_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            config_name: config_name.into(),
        }
    }

    /// Resolved location of the config file.
    pub fn path(&self) -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(&self.app_name, self.config_name.as_str())
            .map_err(ConfigError::Load)
    }
}

impl Persistence for ConfyStore {
    fn load(&self) -> Result<NotesConfig, ConfigError> {
        confy::load(&self.app_name, self.config_name.as_str()).map_err(ConfigError::Load)
    }

    fn save(&mut self, config: &NotesConfig) -> Result<(), ConfigError> {
        confy::store(&self.app_name, self.config_name.as_str(), config).map_err(ConfigError::Save)
    }
}

/// In-memory store. Keeps the last saved snapshot and counts saves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub saved: Option<NotesConfig>,
    pub save_count: usize,
}

impl MemoryStore {
    pub fn with_config(config: NotesConfig) -> Self {
        Self {
            saved: Some(config),
            save_count: 0,
        }
    }
}

impl Persistence for MemoryStore {
    fn load(&self) -> Result<NotesConfig, ConfigError> {
        Ok(self.saved.clone().unwrap_or_default())
    }

    fn save(&mut self, config: &NotesConfig) -> Result<(), ConfigError> {
        self.saved = Some(config.clone());
        self.save_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonenotes_types::{Note, ZoneSettings};

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::default();
        assert_eq!(store.load().expect("load"), NotesConfig::default());

        let mut config = NotesConfig {
            hidden_outside_combat: true,
            ..Default::default()
        };
        config.zones.insert(5, ZoneSettings::new(true));
        store.save(&config).expect("save");

        assert_eq!(store.save_count, 1);
        assert_eq!(store.load().expect("load"), config);
    }

    #[test]
    fn test_load_or_default_normalizes() {
        let mut config = NotesConfig::default();
        config.zones.insert(
            9,
            ZoneSettings {
                enabled: true,
                notes: vec![Note::default()],
                selected_note: 4,
            },
        );
        config.zones.insert(
            10,
            ZoneSettings {
                enabled: true,
                notes: vec![],
                selected_note: 0,
            },
        );

        let loaded = load_or_default(&MemoryStore::with_config(config));
        assert_eq!(loaded.zones[&9].selected_note, 0);
        assert!(!loaded.zones.contains_key(&10));
    }
}
