//! Error types for configuration and catalog loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[source] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),

    #[error("failed to read zone catalog {path}")]
    ReadCatalog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse zone catalog TOML in {path}")]
    ParseCatalog {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
