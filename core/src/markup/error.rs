//! Error types for note markup

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("malformed timestamp directive '{directive}'")]
    MalformedTimestamp { directive: String },
}
