//! Demo error types.

use std::path::PathBuf;

use crate::DecodeError;

/// Demo error.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// A payload value is not valid percent-encoded UTF-8.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Registry JSON could not be parsed.
    #[error("Invalid demo registry: {0}")]
    Json(#[from] serde_json::Error),

    /// Registry file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stylesheet compilation failed.
    #[error("Style compilation failed: {0}")]
    Style(String),
}
