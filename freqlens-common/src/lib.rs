pub mod config;
pub use config::{BinningConfig, Config, DisplayConfig, ExportConfig};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreqLensError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, FreqLensError>;
