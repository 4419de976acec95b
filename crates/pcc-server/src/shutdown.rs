//! Interrupt-triggered shutdown flag.
//!
//! The signal path does nothing beyond raising the flag; the report and
//! process exit always run synchronously in the server loop at a safe
//! point — immediately if the loop is idle in accept, otherwise once the
//! in-flight connection finishes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::Notify;

/// Process-wide shutdown state: an atomically readable flag plus a wakeup
/// for a loop parked in accept.
#[derive(Clone, Debug, Default)]
pub struct ShutdownFlag {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    raised: AtomicBool,
    notify: Notify,
}

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag and wakes an idle accept. The only work performed
    /// on behalf of the signal path.
    pub fn trigger(&self) {
        self.inner.raised.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_triggered(&self) -> bool {
        self.inner.raised.load(Ordering::SeqCst)
    }

    /// Resolves once the flag is raised.
    ///
    /// The notified future is registered before the flag is re-checked, so
    /// a trigger landing between the check and the await cannot be lost.
    pub async fn triggered(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.is_triggered() {
                return;
            }
            notified.await;
        }
    }

    /// Registers the SIGINT watcher task.
    ///
    /// # Errors
    ///
    /// Returns the registration error; the caller treats it as a startup
    /// failure, matching the non-zero exit on handler-registration
    /// failure of the CLI contract.
    pub fn watch_interrupt(&self) -> std::io::Result<()> {
        let mut interrupt = signal(SignalKind::interrupt())?;
        let flag = self.clone();
        tokio::spawn(async move {
            if interrupt.recv().await.is_some() {
                flag.trigger();
            }
        });
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
