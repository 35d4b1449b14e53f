//! Zone catalog sources
//!
//! The catalog itself is external data. Sources only enumerate zones; they
//! never rank or filter them.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use zonenotes_types::Zone;

use crate::context::ConfigError;

/// Anything able to enumerate the known zones.
pub trait ZoneSource {
    fn list_zones(&self) -> Result<Vec<Zone>, ConfigError>;
}

/// A zone row as written in a catalog file.
///
/// ```toml
/// [[zones]]
/// id = 1122
/// name = "Eden's Promise"
/// content = "Eden's Promise: Eternity"
/// ```
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: u32,
    name: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    zones: Vec<CatalogEntry>,
}

/// Zone catalog read from a TOML file.
#[derive(Debug, Clone)]
pub struct TomlZoneSource {
    path: PathBuf,
}

impl TomlZoneSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ZoneSource for TomlZoneSource {
    fn list_zones(&self) -> Result<Vec<Zone>, ConfigError> {
        let content = fs::read_to_string(&self.path).map_err(|e| ConfigError::ReadCatalog {
            path: self.path.clone(),
            source: e,
        })?;
        parse_catalog(&content).map_err(|e| ConfigError::ParseCatalog {
            path: self.path.clone(),
            source: e,
        })
    }
}

fn parse_catalog(content: &str) -> Result<Vec<Zone>, toml::de::Error> {
    let file: CatalogFile = toml::from_str(content)?;
    Ok(file
        .zones
        .into_iter()
        .map(|entry| Zone::new(entry.id, Zone::compose_name(&entry.name, &entry.content)))
        .collect())
}

/// Small catalog used when no catalog file is configured.
pub fn builtin_zones() -> Vec<Zone> {
    [
        (128, "Limsa Lominsa Upper Decks", ""),
        (129, "Limsa Lominsa Lower Decks", ""),
        (132, "New Gridania", ""),
        (130, "Ul'dah - Steps of Nald", ""),
        (1122, "Eden's Promise", "Eden's Promise: Eternity"),
        (992, "The Dying Gasp", "Eden's Gate: Resurrection"),
        (1150, "The Dead Ends", "The Dead Ends"),
    ]
    .into_iter()
    .map(|(id, place, content)| Zone::new(id, Zone::compose_name(place, content)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog() {
        let zones = parse_catalog(
            r#"
            [[zones]]
            id = 1122
            name = "Eden's Promise"
            content = "Eternity"

            [[zones]]
            id = 128
            name = "Limsa Lominsa Upper Decks"
            "#,
        )
        .expect("Should parse");

        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].name, "Eden's Promise (Eternity)");
        assert_eq!(zones[1].to_string(), "128 - Limsa Lominsa Upper Decks");
    }

    #[test]
    fn test_parse_catalog_rejects_bad_id() {
        assert!(parse_catalog("[[zones]]\nid = \"abc\"\nname = \"x\"").is_err());
    }

    #[test]
    fn test_missing_catalog_file() {
        let source = TomlZoneSource::new("/nonexistent/zonenotes/zones.toml");
        let err = source.list_zones().expect_err("file does not exist");
        assert!(matches!(err, ConfigError::ReadCatalog { .. }));
    }

    #[test]
    fn test_builtin_zones_have_names() {
        let zones = builtin_zones();
        assert!(!zones.is_empty());
        assert!(zones.iter().all(|z| !z.name.is_empty()));
    }
}
