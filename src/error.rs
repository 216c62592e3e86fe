use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatsError>;

/// Errors that abort a whole run. Per-template problems never surface here;
/// they are logged and the template is skipped.
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Could not determine home directory")]
    HomeDir,

    #[error("Could not walk template directory {root}: {message}")]
    Walk { root: String, message: String },

    #[error("Could not open addition file {path}: {source}")]
    AdditionsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not create output file {path}: {source}")]
    OutputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl StatsError {
    pub fn exit_code(&self) -> i32 {
        1
    }
}
