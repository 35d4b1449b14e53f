//! Note session: the owner of config, catalog and host state.
//!
//! Host callbacks, settings toggles and note edits all land here. Every
//! mutation is saved immediately and followed by a fresh visibility decision;
//! nothing is batched. All calls happen on the host's single callback thread.

use chrono::NaiveDateTime;
use zonenotes_types::{Note, NotesConfig, Zone, ZoneSettings};

use crate::catalog::ZoneCatalog;
use crate::context::{Persistence, load_or_default};
use crate::events::{HostSignal, SignalHandler};
use crate::markup::{self, DisplayLine};
use crate::notes::{NoteError, ZoneNoteStore};
use crate::visibility::{self, VisibilityInputs, VisibilityResult};

use super::info::{EditorState, HostState};

pub struct NotesSession<P: Persistence> {
    config: NotesConfig,
    persistence: P,
    catalog: ZoneCatalog,
    host: HostState,
    editor: EditorState,
    /// Last visibility decision
    visibility: VisibilityResult,
}

impl<P: Persistence> NotesSession<P> {
    /// Load config from `persistence` and compute the initial ranking and visibility.
    pub fn new(persistence: P, catalog: ZoneCatalog) -> Self {
        let config = load_or_default(&persistence);
        let mut session = Self {
            config,
            persistence,
            catalog,
            host: HostState::default(),
            editor: EditorState::default(),
            visibility: VisibilityResult::default(),
        };
        session.rerank();
        session.refresh();
        tracing::debug!(
            zones = session.catalog.len(),
            configured = session.config.zones.len(),
            "Notes session ready"
        );
        session
    }

    pub fn config(&self) -> &NotesConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ZoneCatalog {
        &self.catalog
    }

    pub fn host(&self) -> &HostState {
        &self.host
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn visibility(&self) -> &VisibilityResult {
        &self.visibility
    }

    /// Settings of the zone open in the editor.
    pub fn editing_settings(&self) -> Option<&ZoneSettings> {
        self.editor
            .selected_zone
            .and_then(|id| self.config.zones.zone(id))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Host lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    pub fn on_login(&mut self, zone_id: u32) {
        self.host.logged_in = true;
        self.host.combat_start = None;
        self.host.current_zone = zone_id;
        tracing::debug!(zone_id, "Logged in");
        self.rerank();
        self.refresh();
    }

    pub fn on_logout(&mut self) {
        self.host.logged_in = false;
        self.host.combat_start = None;
        self.host.current_zone = 0;
        tracing::debug!("Logged out");
        self.rerank();
        self.refresh();
    }

    pub fn on_zone_changed(&mut self, zone_id: u32) {
        self.host.combat_start = None;
        self.host.current_zone = zone_id;
        tracing::debug!(zone_id, "Zone changed");
        self.rerank();
        self.refresh();
    }

    pub fn on_combat_changed(&mut self, in_combat: bool, timestamp: NaiveDateTime) {
        self.host.combat_start = in_combat.then_some(timestamp);
        tracing::debug!(in_combat, "Combat state changed");
        self.refresh();
    }

    /// Toggle the editing surface. Returns whether it is now open.
    pub fn on_command(&mut self) -> bool {
        self.editor.open = !self.editor.open;
        tracing::debug!(open = self.editor.open, "Toggled note editor");
        self.rerank();
        self.refresh();
        self.editor.open
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings surface
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_global_enable(&mut self, enabled: bool) {
        self.config.global_enable = enabled;
        self.commit();
    }

    pub fn set_window_locked(&mut self, locked: bool) {
        self.config.note_window_locked = locked;
        self.commit();
    }

    pub fn set_hidden_outside_combat(&mut self, hidden: bool) {
        self.config.hidden_outside_combat = hidden;
        self.commit();
    }

    pub fn set_lines_hidden_past_time(&mut self, hidden: bool) {
        self.config.lines_hidden_past_time = hidden;
        self.commit();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editing surface
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_zone_filter(&mut self, query: impl Into<String>) {
        self.editor.filter = query.into();
    }

    /// Catalog zones matching the editor's zone filter, in ranked order.
    pub fn filtered_zones(&self) -> impl Iterator<Item = &Zone> {
        self.catalog.filter(&self.editor.filter)
    }

    /// Open a zone in the editor, creating a disabled entry for it if needed.
    pub fn select_zone(&mut self, zone_id: u32) -> Result<(), NoteError> {
        if !self.catalog.contains(zone_id) {
            return Err(rejected(NoteError::UnknownZone(zone_id)));
        }
        if self.config.zones.zone(zone_id).is_none() {
            self.config.zones.ensure(zone_id, false);
            self.save();
        }
        self.editor.selected_zone = Some(zone_id);
        self.editor.filter.clear();
        Ok(())
    }

    /// Append an empty note to the edited zone and select it.
    pub fn new_note(&mut self) -> Result<usize, NoteError> {
        let zone_id = self.editing_zone()?;
        let zones = &mut self.config.zones;
        let index = zones.add_note(zone_id, Note::default()).map_err(rejected)?;
        zones.select_note(zone_id, index).map_err(rejected)?;
        self.commit();
        Ok(index)
    }

    pub fn select_note(&mut self, index: usize) -> Result<(), NoteError> {
        let zone_id = self.editing_zone()?;
        self.config
            .zones
            .select_note(zone_id, index)
            .map_err(rejected)?;
        self.commit();
        Ok(())
    }

    /// Delete the selected note and select the one before it.
    ///
    /// Deleting the last note drops the zone and closes it in the editor.
    pub fn delete_selected_note(&mut self) -> Result<(), NoteError> {
        let zone_id = self.editing_zone()?;
        let zones = &mut self.config.zones;
        let index = zones.zone(zone_id).map_or(0, |z| z.selected_note);

        if zones.remove_note_at(zone_id, index).map_err(rejected)? {
            self.editor.selected_zone = None;
        } else {
            zones
                .select_note(zone_id, index.saturating_sub(1))
                .map_err(rejected)?;
        }
        self.commit();
        Ok(())
    }

    pub fn set_zone_enabled(&mut self, enabled: bool) -> Result<(), NoteError> {
        let zone_id = self.editing_zone()?;
        self.config
            .zones
            .set_enabled(zone_id, enabled)
            .map_err(rejected)?;
        self.save();
        self.rerank();
        self.refresh();
        Ok(())
    }

    pub fn set_note_title(&mut self, title: impl Into<String>) -> Result<(), NoteError> {
        let zone_id = self.editing_zone()?;
        self.config
            .zones
            .set_title(zone_id, title.into())
            .map_err(rejected)?;
        self.commit();
        Ok(())
    }

    pub fn set_note_body(&mut self, body: impl Into<String>) -> Result<(), NoteError> {
        let zone_id = self.editing_zone()?;
        self.config
            .zones
            .set_body(zone_id, body.into())
            .map_err(rejected)?;
        self.commit();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Lines to draw this tick. Empty while the window is hidden.
    pub fn render_lines(&self, now: NaiveDateTime) -> Vec<DisplayLine> {
        if !self.visibility.shown {
            return Vec::new();
        }
        markup::render(
            &self.visibility.body,
            self.host.combat_start,
            now,
            self.config.lines_hidden_past_time,
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn editing_zone(&self) -> Result<u32, NoteError> {
        self.editor
            .selected_zone
            .filter(|id| self.config.zones.zone(*id).is_some())
            .ok_or(NoteError::NoZoneSelected)
            .map_err(rejected)
    }

    fn rerank(&mut self) {
        let zones = &self.config.zones;
        self.catalog
            .rerank(|zone| zones.is_enabled(zone.id), self.host.current_zone);
    }

    fn refresh(&mut self) {
        let inputs = VisibilityInputs {
            global_enabled: self.config.global_enable,
            logged_in: self.host.logged_in,
            window_locked: self.config.note_window_locked,
            hide_outside_combat: self.config.hidden_outside_combat,
            in_combat: self.host.in_combat(),
            zone_id: self.host.current_zone,
        };
        let next = visibility::resolve(&inputs, &self.config.zones);

        if next.shown != self.visibility.shown {
            tracing::debug!(
                shown = next.shown,
                zone_id = inputs.zone_id,
                "Note window visibility changed"
            );
        }
        if next.body != self.visibility.body {
            for (line, e) in markup::validate(&next.body) {
                tracing::warn!(zone_id = inputs.zone_id, line, error = %e, "Invalid timestamp in note");
            }
        }
        self.visibility = next;
    }

    fn save(&mut self) {
        if let Err(e) = self.persistence.save(&self.config) {
            tracing::error!(error = %e, "Failed to save configuration");
        }
    }

    fn commit(&mut self) {
        self.save();
        self.refresh();
    }
}

impl<P: Persistence> SignalHandler for NotesSession<P> {
    fn handle_signal(&mut self, signal: &HostSignal) {
        match signal {
            HostSignal::Login { zone_id } => self.on_login(*zone_id),
            HostSignal::Logout => self.on_logout(),
            HostSignal::ZoneChanged { zone_id } => self.on_zone_changed(*zone_id),
            HostSignal::CombatChanged {
                in_combat,
                timestamp,
            } => self.on_combat_changed(*in_combat, *timestamp),
            HostSignal::Command => {
                self.on_command();
            }
        }
    }
}

fn rejected(e: NoteError) -> NoteError {
    tracing::warn!(error = %e, "Note operation rejected");
    e
}
