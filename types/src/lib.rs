//! Shared configuration types for zone notes
//!
//! This crate contains the serializable data model that is persisted by
//! zonenotes-core and read by any front end that edits or displays notes.

pub mod formatting;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Current config structure version. Increment whenever the layout changes.
pub const CONFIG_VERSION: u32 = 0;

/// Title given to freshly created notes.
pub const DEFAULT_NOTE_TITLE: &str = "Default";

fn default_true() -> bool {
    true
}

fn default_note_title() -> String {
    DEFAULT_NOTE_TITLE.to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Zones
// ─────────────────────────────────────────────────────────────────────────────

/// A game zone as reported by the external zone catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Zone {
    pub id: u32,
    pub name: String,
}

impl Zone {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Compose a display name from a place name and an optional content name.
    ///
    /// # Examples
    /// ```
    /// use zonenotes_types::Zone;
    /// assert_eq!(Zone::compose_name("Limsa Lominsa", ""), "Limsa Lominsa");
    /// assert_eq!(
    ///     Zone::compose_name("The Aetherfont", "The Aetherfont"),
    ///     "The Aetherfont (The Aetherfont)"
    /// );
    /// ```
    pub fn compose_name(place: &str, content: &str) -> String {
        if content.is_empty() {
            place.to_string()
        } else {
            format!("{} ({})", place, content)
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.id, self.name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Notes
// ─────────────────────────────────────────────────────────────────────────────

/// A single note. The body is free text and may contain `{t:MM:SS}` directives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default = "default_note_title")]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl Default for Note {
    fn default() -> Self {
        Self {
            title: default_note_title(),
            body: String::new(),
        }
    }
}

impl Note {
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Per-zone note collection.
///
/// `notes` is never empty while the entry lives in [`NotesConfig::zones`] and
/// `selected_note` always indexes a live note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_notes")]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub selected_note: usize,
}

fn default_notes() -> Vec<Note> {
    vec![Note::default()]
}

impl ZoneSettings {
    /// Fresh settings holding exactly one empty note.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            notes: default_notes(),
            selected_note: 0,
        }
    }

    /// The currently selected note.
    pub fn active_note(&self) -> Option<&Note> {
        self.notes.get(self.selected_note)
    }

    pub fn active_note_mut(&mut self) -> Option<&mut Note> {
        self.notes.get_mut(self.selected_note)
    }
}

impl fmt::Display for ZoneSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Enabled: {}, Notes: {}", self.enabled, self.notes.len())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Top-level Config
// ─────────────────────────────────────────────────────────────────────────────

/// Persisted settings: global toggles plus per-zone notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesConfig {
    #[serde(default)]
    pub version: u32,

    /// Master switch, supersedes every other setting.
    #[serde(default = "default_true")]
    pub global_enable: bool,

    /// Locked windows only show for enabled zones.
    #[serde(default)]
    pub note_window_locked: bool,

    #[serde(default)]
    pub hidden_outside_combat: bool,

    /// Drop countdown lines once they reach zero instead of showing `00:00`.
    #[serde(default)]
    pub lines_hidden_past_time: bool,

    #[serde(default, with = "zone_keys")]
    pub zones: HashMap<u32, ZoneSettings>,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            global_enable: true,
            note_window_locked: false,
            hidden_outside_combat: false,
            lines_hidden_past_time: false,
            zones: HashMap::new(),
        }
    }
}

impl NotesConfig {
    /// Re-establish the per-zone invariants on data read from disk.
    ///
    /// Zones without notes are dropped and out-of-range selections are clamped.
    /// Returns the number of zones that had to be touched.
    pub fn normalize(&mut self) -> usize {
        let before = self.zones.len();
        self.zones.retain(|_, settings| !settings.notes.is_empty());
        let mut repaired = before - self.zones.len();

        for settings in self.zones.values_mut() {
            if settings.selected_note >= settings.notes.len() {
                settings.selected_note = settings.notes.len() - 1;
                repaired += 1;
            }
        }
        repaired
    }
}

/// TOML tables only accept string keys, so zone ids are written as strings.
mod zone_keys {
    use super::*;

    pub fn serialize<S: Serializer>(
        zones: &HashMap<u32, ZoneSettings>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let ordered: BTreeMap<String, &ZoneSettings> = zones
            .iter()
            .map(|(id, settings)| (id.to_string(), settings))
            .collect();
        ordered.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<u32, ZoneSettings>, D::Error> {
        let raw = HashMap::<String, ZoneSettings>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(key, settings)| {
                key.parse::<u32>()
                    .map(|id| (id, settings))
                    .map_err(|_| serde::de::Error::custom(format!("invalid zone id '{}'", key)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NotesConfig::default();
        assert!(config.global_enable);
        assert!(!config.note_window_locked);
        assert!(!config.hidden_outside_combat);
        assert!(!config.lines_hidden_past_time);
        assert!(config.zones.is_empty());

        let settings = ZoneSettings::new(false);
        assert_eq!(settings.notes.len(), 1);
        assert_eq!(settings.selected_note, 0);
        assert_eq!(settings.notes[0].title, "Default");
        assert_eq!(settings.notes[0].body, "");
    }

    #[test]
    fn test_display() {
        assert_eq!(Zone::new(1234, "Eden").to_string(), "1234 - Eden");
        assert_eq!(Note::default().to_string(), "Default");
        assert_eq!(ZoneSettings::new(true).to_string(), "Enabled: true, Notes: 1");
    }

    #[test]
    fn test_toml_roundtrip_with_zone_keys() {
        let mut config = NotesConfig {
            note_window_locked: true,
            lines_hidden_past_time: true,
            ..Default::default()
        };
        let mut settings = ZoneSettings::new(true);
        settings.notes.push(Note::with_body("{t:01:30} tank swap\nstack"));
        settings.selected_note = 1;
        config.zones.insert(1122, settings);

        let text = toml::to_string(&config).expect("serialize");
        assert!(text.contains("1122"));

        let parsed: NotesConfig = toml::from_str(&text).expect("deserialize");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed: NotesConfig = toml::from_str("note_window_locked = true").expect("parse");
        assert!(parsed.global_enable);
        assert!(parsed.note_window_locked);
        assert!(parsed.zones.is_empty());

        let parsed: NotesConfig = toml::from_str("[zones.77]\nenabled = true").expect("parse");
        let zone = &parsed.zones[&77];
        assert_eq!(zone.notes.len(), 1);
        assert_eq!(zone.active_note().map(|n| n.title.as_str()), Some("Default"));
    }

    #[test]
    fn test_invalid_zone_key_rejected() {
        let result: Result<NotesConfig, _> = toml::from_str("[zones.abc]\nenabled = true");
        assert!(result.is_err());
    }

    #[test]
    fn test_normalize() {
        let mut config = NotesConfig::default();
        config.zones.insert(
            1,
            ZoneSettings {
                enabled: true,
                notes: vec![],
                selected_note: 0,
            },
        );
        config.zones.insert(
            2,
            ZoneSettings {
                enabled: true,
                notes: vec![Note::default(), Note::default()],
                selected_note: 5,
            },
        );
        config.zones.insert(3, ZoneSettings::new(false));

        assert_eq!(config.normalize(), 2);
        assert!(!config.zones.contains_key(&1));
        assert_eq!(config.zones[&2].selected_note, 1);
        assert_eq!(config.zones[&3].selected_note, 0);
    }
}
