/// Error types for catalog access, fixtures and export
///
/// `ApiError` is `Clone` because request outcomes travel inside iced
/// messages, which must be cloneable.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a request to the remote catalog API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request was not sent or the response body could not be read
    #[error("network error: {0}")]
    Network(String),

    #[error("server responded with status {status}")]
    Status { status: u16 },

    /// The body was not the JSON we expected
    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ApiError::Status { status: status.as_u16() },
            None => ApiError::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Failure to read the local fallback dataset
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fixture {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("fixture {path} has unsupported version {version}")]
    UnsupportedVersion { path: PathBuf, version: u32 },
}

impl FixtureError {
    /// True when the fixture file simply does not exist
    pub fn is_missing(&self) -> bool {
        matches!(self, FixtureError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Failure to write a CSV export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("export task failed: {0}")]
    Join(String),
}
