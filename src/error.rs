// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TidyError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("could not find compilation database above {start}")]
    CompileDbNotFound { start: PathBuf },

    #[error("malformed compilation database {path}: {source}")]
    CompileDb {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("malformed fix document {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("malformed config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unable to run {tool}: {reason}")]
    ToolUnavailable { tool: String, reason: String },

    #[error("applying fixes failed: {0}")]
    ApplyFailed(String),

    #[error("task queue closed before all files were queued")]
    QueueClosed,

    #[error("could not install Ctrl-C handler: {0}")]
    Interrupt(#[from] ctrlc::Error),
}

pub type Result<T> = std::result::Result<T, TidyError>;

impl TidyError {
    /// Wraps an I/O error together with the path it concerns.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        TidyError::Io {
            source,
            path: path.into(),
        }
    }
}

// Allow `?` on std::io::Error by converting to TidyError::Io with unknown path.
impl From<std::io::Error> for TidyError {
    fn from(source: std::io::Error) -> Self {
        TidyError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

// Directory walk errors carry their own path when they have one
impl From<walkdir::Error> for TidyError {
    fn from(e: walkdir::Error) -> Self {
        let path = e
            .path()
            .map_or_else(|| PathBuf::from("<unknown>"), PathBuf::from);
        let source = e
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
        TidyError::Io { source, path }
    }
}
