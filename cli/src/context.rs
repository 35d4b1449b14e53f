use std::path::Path;

use zonenotes_core::{ConfyStore, NotesSession, TomlZoneSource, ZoneCatalog, builtin_zones};

/// Holds all state for the CLI host.
/// This is a lightweight container - logic lives in the notes session.
pub struct CliContext {
    pub session: NotesSession<ConfyStore>,
}

impl CliContext {
    /// Build the zone catalog and load the persisted notes.
    ///
    /// A catalog file that cannot be read falls back to the builtin zones.
    pub fn new(zones_path: Option<&Path>, config_name: &str) -> Self {
        let catalog = match zones_path {
            Some(path) => ZoneCatalog::from_source(&TomlZoneSource::new(path)).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to builtin zone catalog");
                ZoneCatalog::new(builtin_zones())
            }),
            None => ZoneCatalog::new(builtin_zones()),
        };

        let store = ConfyStore::new(zonenotes_core::context::APP_NAME, config_name);
        Self {
            session: NotesSession::new(store, catalog),
        }
    }
}
