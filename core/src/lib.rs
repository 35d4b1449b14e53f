pub mod catalog;
pub mod context;
pub mod events;
pub mod markup;
pub mod notes;
pub mod session;
pub mod visibility;

// Re-exports for convenience
pub use catalog::{TomlZoneSource, ZoneCatalog, ZoneSource, builtin_zones, rank_zones};
pub use context::{ConfigError, ConfyStore, MemoryStore, Persistence};
pub use events::{HostSignal, SignalHandler};
pub use markup::{CountdownState, DisplayLine, MarkupError, render};
pub use notes::{NoteError, ZoneMap, ZoneNoteStore};
pub use session::{EditorState, HostState, NotesSession};
pub use visibility::{VisibilityInputs, VisibilityResult, resolve};
pub use zonenotes_types::{Note, NotesConfig, Zone, ZoneSettings};
