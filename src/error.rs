use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HebscribeError {
    #[error("Time formatting failed: {seconds} is not a valid non-negative offset in seconds")]
    InvalidTimestamp { seconds: f64 },

    #[error("Unsupported subtitle format: '{0}'. Use 'srt' or 'vtt'")]
    UnsupportedFormat(String),

    #[error("Recognition failed: {0}")]
    Recognition(String),

    #[error("Normalization failed: {0}")]
    Normalization(String),

    #[error("Subtitle parsing failed: {0}")]
    Parse(String),

    #[error("Writing {path} failed: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HebscribeError>;
