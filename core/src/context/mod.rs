mod config;
mod error;

pub use config::{
    APP_NAME, CONFIG_NAME, ConfyStore, MemoryStore, Persistence, load_or_default,
};
pub use error::ConfigError;
