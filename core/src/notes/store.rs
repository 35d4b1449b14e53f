//! Zone note store operations
//!
//! Notes live in [`NotesConfig::zones`](zonenotes_types::NotesConfig), a plain
//! map from zone id to [`ZoneSettings`]. [`ZoneNoteStore`] layers the editing
//! operations on top of that map and keeps two invariants:
//!
//! - a stored zone always has at least one note
//! - `selected_note` always indexes a live note
//!
//! Removing the last note of a zone drops the zone entry, which puts the zone
//! back into the "unconfigured" state. Persisting and re-resolving visibility
//! after a mutation is the caller's job.

use std::collections::HashMap;

use zonenotes_types::{Note, ZoneSettings};

use super::NoteError;

pub type ZoneMap = HashMap<u32, ZoneSettings>;

/// Note editing operations on a zone map
pub trait ZoneNoteStore {
    /// Settings for a zone, `None` when the zone has no notes configured.
    fn zone(&self, zone_id: u32) -> Option<&ZoneSettings>;

    /// Insert fresh settings with one empty note if the zone is absent.
    fn ensure(&mut self, zone_id: u32, initially_enabled: bool) -> &mut ZoneSettings;

    /// Append a note, returning its index.
    fn add_note(&mut self, zone_id: u32, note: Note) -> Result<usize, NoteError>;

    /// Remove a note. Returns true when this removed the zone entry itself.
    fn remove_note_at(&mut self, zone_id: u32, index: usize) -> Result<bool, NoteError>;

    fn select_note(&mut self, zone_id: u32, index: usize) -> Result<(), NoteError>;

    fn set_enabled(&mut self, zone_id: u32, enabled: bool) -> Result<(), NoteError>;

    /// Rename the selected note.
    fn set_title(&mut self, zone_id: u32, title: String) -> Result<(), NoteError>;

    /// Replace the body of the selected note.
    fn set_body(&mut self, zone_id: u32, body: String) -> Result<(), NoteError>;

    /// Selected note, `None` when the zone has no notes configured.
    fn selected_note(&self, zone_id: u32) -> Option<&Note> {
        self.zone(zone_id).and_then(ZoneSettings::active_note)
    }

    /// Unconfigured zones count as disabled.
    fn is_enabled(&self, zone_id: u32) -> bool {
        self.zone(zone_id).is_some_and(|z| z.enabled)
    }
}

impl ZoneNoteStore for ZoneMap {
    fn zone(&self, zone_id: u32) -> Option<&ZoneSettings> {
        self.get(&zone_id)
    }

    fn ensure(&mut self, zone_id: u32, initially_enabled: bool) -> &mut ZoneSettings {
        self.entry(zone_id).or_insert_with(|| {
            tracing::debug!(zone_id, "Added zone to configuration");
            ZoneSettings::new(initially_enabled)
        })
    }

    fn add_note(&mut self, zone_id: u32, note: Note) -> Result<usize, NoteError> {
        let settings = zone_mut(self, zone_id)?;
        settings.notes.push(note);
        Ok(settings.notes.len() - 1)
    }

    fn remove_note_at(&mut self, zone_id: u32, index: usize) -> Result<bool, NoteError> {
        let settings = zone_mut(self, zone_id)?;
        check_index(settings, zone_id, index)?;

        settings.notes.remove(index);

        if settings.notes.is_empty() {
            self.remove(&zone_id);
            tracing::debug!(zone_id, "Removed zone with no remaining notes");
            return Ok(true);
        }

        // Selection only moves when it fell off the end
        if settings.selected_note >= settings.notes.len() {
            settings.selected_note = index.saturating_sub(1);
        }
        Ok(false)
    }

    fn select_note(&mut self, zone_id: u32, index: usize) -> Result<(), NoteError> {
        let settings = zone_mut(self, zone_id)?;
        check_index(settings, zone_id, index)?;
        settings.selected_note = index;
        Ok(())
    }

    fn set_enabled(&mut self, zone_id: u32, enabled: bool) -> Result<(), NoteError> {
        zone_mut(self, zone_id)?.enabled = enabled;
        Ok(())
    }

    fn set_title(&mut self, zone_id: u32, title: String) -> Result<(), NoteError> {
        active_note_mut(self, zone_id)?.title = title;
        Ok(())
    }

    fn set_body(&mut self, zone_id: u32, body: String) -> Result<(), NoteError> {
        active_note_mut(self, zone_id)?.body = body;
        Ok(())
    }
}

fn zone_mut(zones: &mut ZoneMap, zone_id: u32) -> Result<&mut ZoneSettings, NoteError> {
    zones
        .get_mut(&zone_id)
        .ok_or(NoteError::UnconfiguredZone(zone_id))
}

fn active_note_mut(zones: &mut ZoneMap, zone_id: u32) -> Result<&mut Note, NoteError> {
    let settings = zone_mut(zones, zone_id)?;
    let (index, len) = (settings.selected_note, settings.notes.len());
    settings
        .active_note_mut()
        .ok_or(NoteError::IndexOutOfRange {
            zone_id,
            index,
            len,
        })
}

fn check_index(settings: &ZoneSettings, zone_id: u32, index: usize) -> Result<(), NoteError> {
    if index < settings.notes.len() {
        Ok(())
    } else {
        Err(NoteError::IndexOutOfRange {
            zone_id,
            index,
            len: settings.notes.len(),
        })
    }
}
