//! Inline note markup
//!
//! Note bodies are plain text with one supported directive, `{t:MM:SS}`,
//! which turns its line into a countdown anchored to combat start.

mod countdown;
mod error;

pub use countdown::{
    CountdownState, Directive, DisplayLine, INVALID_TIMESTAMP_LABEL, parse_directive, render, validate,
};
pub use error::MarkupError;
