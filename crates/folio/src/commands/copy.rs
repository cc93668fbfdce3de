//! `folio copy` command implementation.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use folio_clipboard::Clipboard;
use folio_config::Config;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the copy command.
#[derive(Args)]
pub(crate) struct CopyArgs {
    /// Text to copy.
    text: String,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Milliseconds before the copied state resets (overrides config).
    #[arg(long)]
    reset_delay_ms: Option<u64>,

    /// Exit right after copying instead of waiting for the reset.
    #[arg(long)]
    no_wait: bool,
}

impl CopyArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.run())
    }

    async fn run(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let delay_ms = self
            .reset_delay_ms
            .unwrap_or(config.clipboard.reset_delay_ms);

        let clipboard = Clipboard::system().with_delay(Duration::from_millis(delay_ms));
        let mut copied = clipboard.subscribe();

        clipboard.copy(&self.text).await?;
        output.success("Copied");

        if self.no_wait {
            return Ok(());
        }
        // The flag may already have reset with a zero delay
        while *copied.borrow_and_update() {
            if copied.changed().await.is_err() {
                break;
            }
        }
        output.info("Copy state reset");
        Ok(())
    }
}
