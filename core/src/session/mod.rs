pub mod info;
pub mod notes;

pub use info::{EditorState, HostState};
pub use notes::NotesSession;
