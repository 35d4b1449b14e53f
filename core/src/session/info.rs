use chrono::NaiveDateTime;

/// Player state as last reported by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostState {
    pub logged_in: bool,
    /// Zone the player is standing in, 0 while logged out
    pub current_zone: u32,
    /// When the current combat began. `None` outside combat.
    pub combat_start: Option<NaiveDateTime>,
}

impl HostState {
    pub fn in_combat(&self) -> bool {
        self.combat_start.is_some()
    }
}

/// State of the note editing surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub open: bool,
    /// Zone whose notes are being edited
    pub selected_zone: Option<u32>,
    /// Zone picker query, cleared once a zone is picked
    pub filter: String,
}
