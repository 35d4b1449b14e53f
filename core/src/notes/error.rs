//! Error types for note store operations

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteError {
    #[error("note index {index} out of range for zone {zone_id} ({len} notes)")]
    IndexOutOfRange {
        zone_id: u32,
        index: usize,
        len: usize,
    },

    #[error("zone {0} has no notes configured")]
    UnconfiguredZone(u32),

    #[error("zone {0} is not in the zone catalog")]
    UnknownZone(u32),

    #[error("no zone selected")]
    NoZoneSelected,
}
