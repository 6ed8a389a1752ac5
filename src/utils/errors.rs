use std::io;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
