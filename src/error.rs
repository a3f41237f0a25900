use std::path::PathBuf;

use thiserror::Error;

/// Failure of an external detector call. Never surfaced past [`crate::enhance`].
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("detector returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model is still loading: {message}")]
    ModelLoading { message: String },

    #[error("unexpected detector response: {0}")]
    Decode(String),
}

impl DetectorError {
    pub(crate) fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::ModelLoading { .. })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {path}: {source}", path = .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
