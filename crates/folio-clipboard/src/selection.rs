//! Fallback provider: terminal selection via the OSC 52 escape sequence.

use std::io::{IsTerminal, Stdout, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::{ClipboardError, ClipboardProvider};

const NAME: &str = "selection";

/// Build the OSC 52 "set clipboard" sequence for `text`.
fn osc52(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Copies text by asking the terminal to set its selection.
///
/// Works over SSH and inside most terminal multiplexers, where no platform
/// clipboard tool can reach the user's clipboard.
pub struct SelectionClipboard<W> {
    writer: Mutex<W>,
    require_tty: bool,
}

impl SelectionClipboard<Stdout> {
    /// Write to standard output. Fails unless stdout is a terminal.
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(std::io::stdout()),
            require_tty: true,
        }
    }
}

impl<W: Write + Send> SelectionClipboard<W> {
    /// Write the sequence to an arbitrary writer.
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            require_tty: false,
        }
    }

    /// Consume the provider and return the writer.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError::NotAllowed`] if the writer lock was poisoned.
    pub fn into_inner(self) -> Result<W, ClipboardError> {
        self.writer
            .into_inner()
            .map_err(|_| ClipboardError::not_allowed())
    }
}

#[async_trait]
impl<W: Write + Send> ClipboardProvider for SelectionClipboard<W> {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.require_tty && !std::io::stdout().is_terminal() {
            return Err(ClipboardError::Unsupported { provider: NAME });
        }

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| ClipboardError::not_allowed())?;
        let io = |source| ClipboardError::Io {
            provider: NAME,
            source,
        };
        writer.write_all(osc52(text).as_bytes()).map_err(io)?;
        writer.flush().map_err(io)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52("hello"), "\x1b]52;c;aGVsbG8=\x07");
    }

    #[tokio::test]
    async fn test_writes_sequence_to_writer() {
        let clipboard = SelectionClipboard::with_writer(Vec::new());
        clipboard.write_text("hello").await.unwrap();

        let written = clipboard.into_inner().unwrap();
        assert_eq!(written, b"\x1b]52;c;aGVsbG8=\x07");
    }

    #[tokio::test]
    async fn test_multibyte_text() {
        let clipboard = SelectionClipboard::with_writer(Vec::new());
        clipboard.write_text("héllo ✓").await.unwrap();

        let written = String::from_utf8(clipboard.into_inner().unwrap()).unwrap();
        let payload = written
            .strip_prefix("\x1b]52;c;")
            .and_then(|s| s.strip_suffix('\x07'))
            .unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), "héllo ✓".as_bytes());
    }
}
