use chrono::NaiveDateTime;

/// Lifecycle events delivered by the host.
/// Each one leads to a re-rank of the zone catalog and a fresh visibility decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostSignal {
    /// Player logged in while standing in `zone_id`
    Login { zone_id: u32 },
    Logout,
    ZoneChanged { zone_id: u32 },
    CombatChanged {
        in_combat: bool,
        timestamp: NaiveDateTime,
    },
    /// The toggle command for the editing surface
    Command,
}
