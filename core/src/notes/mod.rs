//! Per-zone note storage

mod error;
mod store;

pub use error::NoteError;
pub use store::{ZoneMap, ZoneNoteStore};
