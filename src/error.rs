use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GdsmellError {
    #[error("Path {} is not a valid file or directory", .0.display())]
    InvalidPath(PathBuf),

    #[error("Failed to read file: {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not load config file {}: {message}", path.display())]
    ConfigLoad { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl GdsmellError {
    /// Short variant name used as the heading of operator diagnostics.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidPath(_) => "InvalidPath",
            Self::FileRead { .. } => "FileRead",
            Self::ConfigLoad { .. } => "ConfigLoad",
            Self::Config(_) => "Config",
            Self::InvalidPattern { .. } => "InvalidPattern",
            Self::Io(_) => "IO",
            Self::JsonSerialize(_) => "JsonSerialize",
        }
    }

    /// Underlying cause, if the variant wraps one.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::FileRead { source, .. } => Some(source.to_string()),
            Self::InvalidPattern { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GdsmellError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
