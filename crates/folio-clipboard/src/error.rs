//! Clipboard error types.

/// Clipboard error.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// Every copy path failed; the last failure is kept as the source.
    #[error("The request is not allowed")]
    NotAllowed {
        #[source]
        source: Option<Box<ClipboardError>>,
    },

    /// The provider is not available on this platform.
    #[error("{provider} clipboard is not available")]
    Unsupported {
        /// Provider name.
        provider: &'static str,
    },

    /// The provider failed with an I/O error.
    #[error("{provider} clipboard I/O error: {source}")]
    Io {
        /// Provider name.
        provider: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The clipboard command exited unsuccessfully.
    #[error("{program} exited with {status}")]
    CommandFailed {
        /// Program that was run.
        program: String,
        /// Exit status.
        status: std::process::ExitStatus,
    },
}

impl ClipboardError {
    /// Create a "not allowed" error without a cause.
    #[must_use]
    pub fn not_allowed() -> Self {
        Self::NotAllowed { source: None }
    }

    /// True for the "not allowed" classification surfaced to callers.
    #[must_use]
    pub fn is_not_allowed(&self) -> bool {
        matches!(self, Self::NotAllowed { .. })
    }
}
