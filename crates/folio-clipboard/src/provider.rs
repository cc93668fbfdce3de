//! Clipboard provider trait and the primary/fallback copy chain.

use async_trait::async_trait;

use crate::ClipboardError;

/// A way of putting text on the clipboard.
#[async_trait]
pub trait ClipboardProvider: Send + Sync {
    /// Short provider name for logs and errors.
    fn name(&self) -> &'static str;

    /// Write text to the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError`] if the provider is unavailable or the write fails.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Copy text using `primary`, falling back to `fallback`.
///
/// The fallback runs only when the primary provider is absent or fails. This
/// is a fallback chain, not a retry: each path is attempted once.
///
/// # Errors
///
/// Returns [`ClipboardError::NotAllowed`] when both paths fail.
pub async fn copy_text(
    primary: Option<&dyn ClipboardProvider>,
    fallback: &dyn ClipboardProvider,
    text: &str,
) -> Result<(), ClipboardError> {
    if let Some(primary) = primary {
        match primary.write_text(text).await {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::debug!(provider = primary.name(), error = %e, "Primary clipboard failed");
            }
        }
    }

    fallback.write_text(text).await.map_err(|e| {
        tracing::warn!(provider = fallback.name(), error = %e, "Clipboard fallback failed");
        if e.is_not_allowed() {
            e
        } else {
            ClipboardError::NotAllowed {
                source: Some(Box::new(e)),
            }
        }
    })
}
