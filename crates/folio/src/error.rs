//! CLI error types.

use folio_clipboard::ClipboardError;
use folio_config::ConfigError;
use folio_content::ContentError;
use folio_demo::{DecodeError, DemoError};
use folio_site::SiteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Demo(#[from] DemoError),

    #[error("{0}")]
    Decode(#[from] DecodeError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Clipboard(#[from] ClipboardError),

    #[error("{0}")]
    Validation(String),
}
