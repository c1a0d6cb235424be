pub mod search;
pub mod vendors;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid batch file: {0}")]
    InvalidBatch(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Core library error: {0}")]
    Core(#[from] basequote_core::VendorError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, CommandError>;
