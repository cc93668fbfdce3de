//! Primary provider: the platform clipboard command.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::{ClipboardError, ClipboardProvider};

const NAME: &str = "system";

/// Clipboard tools probed on `PATH`, in order.
const CANDIDATES: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip.exe", &[]),
];

/// Copies text by piping it into the platform clipboard tool.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Create a provider for an explicit program and arguments.
    pub fn new(program: impl Into<PathBuf>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Find the first clipboard tool available on `PATH`.
    ///
    /// Returns `None` when the platform offers none.
    #[must_use]
    pub fn detect() -> Option<Self> {
        CANDIDATES.iter().find_map(|(name, args)| {
            let program = which::which(name).ok()?;
            tracing::debug!(program = %program.display(), "Found clipboard tool");
            Some(Self::new(program, args.iter().copied()))
        })
    }

    fn io_error(source: std::io::Error) -> ClipboardError {
        ClipboardError::Io {
            provider: NAME,
            source,
        }
    }
}

#[async_trait]
impl ClipboardProvider for CommandClipboard {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(Self::io_error)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(Self::io_error)?;
            // Dropping stdin closes the pipe so the tool sees EOF
        }

        let status = child.wait().await.map_err(Self::io_error)?;
        if !status.success() {
            return Err(ClipboardError::CommandFailed {
                program: self.program.display().to_string(),
                status,
            });
        }
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_command() {
        let clipboard = CommandClipboard::new("cat", Vec::<String>::new());
        clipboard.write_text("hello").await.unwrap();
    }

    #[tokio::test]
    async fn test_failing_command() {
        let clipboard = CommandClipboard::new("false", Vec::<String>::new());
        let err = clipboard.write_text("hello").await.unwrap_err();
        assert!(matches!(err, ClipboardError::CommandFailed { .. }));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let clipboard = CommandClipboard::new("/nonexistent/clipboard-tool", Vec::<String>::new());
        let err = clipboard.write_text("hello").await.unwrap_err();
        assert!(matches!(err, ClipboardError::Io { .. }));
    }
}
