//! Copy with a transient "copied" flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;

use crate::{ClipboardError, ClipboardProvider, CommandClipboard, SelectionClipboard, copy_text};

/// How long the copied flag stays set after a successful copy.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(3000);

/// Clipboard handle with a copied flag that resets after a delay.
///
/// Each successful copy sets the flag and re-arms the reset timer, so the
/// flag stays `true` until `delay` after the most recent copy. Failed copies
/// leave the flag untouched. Resets are spawned on the current tokio runtime.
#[derive(Clone)]
pub struct Clipboard {
    primary: Option<Arc<dyn ClipboardProvider>>,
    fallback: Arc<dyn ClipboardProvider>,
    delay: Duration,
    copied: Arc<watch::Sender<bool>>,
    generation: Arc<AtomicU64>,
}

impl Clipboard {
    /// Create a clipboard from explicit providers.
    pub fn new(
        primary: Option<Arc<dyn ClipboardProvider>>,
        fallback: Arc<dyn ClipboardProvider>,
    ) -> Self {
        let (copied, _) = watch::channel(false);
        Self {
            primary,
            fallback,
            delay: DEFAULT_RESET_DELAY,
            copied: Arc::new(copied),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Platform clipboard tool with the terminal selection as fallback.
    #[must_use]
    pub fn system() -> Self {
        let primary = CommandClipboard::detect()
            .map(|command| Arc::new(command) as Arc<dyn ClipboardProvider>);
        if primary.is_none() {
            tracing::debug!("No clipboard tool found, using terminal selection");
        }
        Self::new(primary, Arc::new(SelectionClipboard::stdout()))
    }

    /// Set the reset delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Reset delay in effect.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Current value of the copied flag.
    #[must_use]
    pub fn copied(&self) -> bool {
        *self.copied.borrow()
    }

    /// Watch the copied flag.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.copied.subscribe()
    }

    /// Copy text and set the copied flag.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError::NotAllowed`] when no copy path succeeds.
    pub async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        copy_text(self.primary.as_deref(), self.fallback.as_ref(), text).await?;
        self.mark_copied();
        Ok(())
    }

    /// Copy the value currently held by a source.
    ///
    /// The value is read at call time, so later changes to the source are
    /// picked up by the next copy.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError::NotAllowed`] when no copy path succeeds.
    pub async fn copy_from(&self, source: &watch::Receiver<String>) -> Result<(), ClipboardError> {
        let text = source.borrow().clone();
        self.copy(&text).await
    }

    fn mark_copied(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.copied.send_replace(true);

        let copied = Arc::clone(&self.copied);
        let current = Arc::clone(&self.generation);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // A newer copy owns the flag now
            if current.load(Ordering::SeqCst) == generation {
                copied.send_replace(false);
            }
        });
    }
}

impl std::fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clipboard")
            .field("primary", &self.primary.as_ref().map(|p| p.name()))
            .field("fallback", &self.fallback.name())
            .field("delay", &self.delay)
            .field("copied", &self.copied())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::sleep;

    use super::*;
    use crate::provider::testing::FakeProvider;

    fn clipboard(primary: FakeProvider, fallback: FakeProvider) -> (Clipboard, Arc<FakeProvider>) {
        let primary = Arc::new(primary);
        let clipboard = Clipboard::new(
            Some(Arc::clone(&primary) as Arc<dyn ClipboardProvider>),
            Arc::new(fallback),
        );
        (clipboard, primary)
    }

    #[tokio::test(start_paused = true)]
    async fn test_copied_resets_after_delay() {
        let (clipboard, primary) =
            clipboard(FakeProvider::ok("primary"), FakeProvider::ok("fallback"));
        assert!(!clipboard.copied());

        clipboard.copy("npm i folio").await.unwrap();
        assert!(clipboard.copied());
        assert_eq!(primary.written(), vec!["npm i folio"]);

        sleep(Duration::from_millis(2999)).await;
        assert!(clipboard.copied());

        sleep(Duration::from_millis(2)).await;
        assert!(!clipboard.copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_primary_uses_fallback_and_resets() {
        let fallback = Arc::new(FakeProvider::ok("fallback"));
        let clipboard = Clipboard::new(None, Arc::clone(&fallback) as Arc<dyn ClipboardProvider>);

        clipboard.copy("x").await.unwrap();
        assert_eq!(fallback.written(), vec!["x"]);
        assert!(clipboard.copied());

        sleep(DEFAULT_RESET_DELAY + Duration::from_millis(1)).await;
        assert!(!clipboard.copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeat_copy_rearms_timer() {
        let (clipboard, _) = clipboard(FakeProvider::ok("primary"), FakeProvider::ok("fallback"));

        clipboard.copy("a").await.unwrap();
        sleep(Duration::from_millis(2000)).await;
        clipboard.copy("b").await.unwrap();

        sleep(Duration::from_millis(1500)).await;
        assert!(clipboard.copied());

        sleep(Duration::from_millis(1600)).await;
        assert!(!clipboard.copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_delay() {
        let (clipboard, _) = clipboard(FakeProvider::ok("primary"), FakeProvider::ok("fallback"));
        let clipboard = clipboard.with_delay(Duration::from_millis(100));

        clipboard.copy("a").await.unwrap();
        sleep(Duration::from_millis(101)).await;
        assert!(!clipboard.copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_copy_leaves_flag_unset() {
        let (clipboard, _) = clipboard(
            FakeProvider::failing("primary"),
            FakeProvider::failing("fallback"),
        );

        let err = clipboard.copy("a").await.unwrap_err();
        assert!(err.is_not_allowed());
        assert!(!clipboard.copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_from_reads_current_value() {
        let (clipboard, primary) =
            clipboard(FakeProvider::ok("primary"), FakeProvider::ok("fallback"));
        let (tx, rx) = watch::channel("first".to_owned());

        clipboard.copy_from(&rx).await.unwrap();
        tx.send_replace("second".to_owned());
        clipboard.copy_from(&rx).await.unwrap();

        assert_eq!(primary.written(), vec!["first", "second"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribe_sees_transitions() {
        let (clipboard, _) = clipboard(FakeProvider::ok("primary"), FakeProvider::ok("fallback"));
        let mut rx = clipboard.subscribe();

        clipboard.copy("a").await.unwrap();
        rx.changed().await.unwrap();
        assert!(*rx.borrow_and_update());

        rx.changed().await.unwrap();
        assert!(!*rx.borrow_and_update());
    }
}
