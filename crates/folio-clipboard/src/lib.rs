//! Clipboard copy for Folio.
//!
//! Copies text through a primary provider (the platform clipboard tool) and
//! falls back to a legacy selection-based provider when the primary one is
//! missing or fails. [`Clipboard`] adds a transient "copied" flag that
//! reverts to `false` after a delay (3 s by default).
//!
//! # Example
//!
//! ```ignore
//! use folio_clipboard::Clipboard;
//!
//! let clipboard = Clipboard::system();
//! clipboard.copy("npm install folio").await?;
//! assert!(clipboard.copied());
//! ```

mod clipboard;
mod command;
mod error;
mod provider;
mod selection;

pub use clipboard::{Clipboard, DEFAULT_RESET_DELAY};
pub use command::CommandClipboard;
pub use error::ClipboardError;
pub use provider::{ClipboardProvider, copy_text};
pub use selection::SelectionClipboard;
