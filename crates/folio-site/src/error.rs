//! Site error types.

use std::path::PathBuf;

use folio_content::ContentError;
use folio_demo::DecodeError;

/// Site error.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sitemap generation failed: {0}")]
    Xml(String),

    #[error("Invalid glob pattern {pattern:?}: {message}")]
    Glob { pattern: String, message: String },

    /// No component registered under the name.
    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    /// A component rejected its props.
    #[error("{component}: {message}")]
    Props {
        component: &'static str,
        message: String,
    },
}

impl SiteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
