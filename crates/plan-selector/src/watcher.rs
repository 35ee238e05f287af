//! Revision trigger lifecycle
//!
//! [`RevisionWatcher`] bridges the application's readiness signal to a
//! selector: each observed transition into [`ReadyToRevise::Yes`]
//! invokes the supplied callback on the watcher task. Disposing the
//! watcher (or dropping it) aborts the task; cancellation takes effect
//! before the next signal delivery, never mid-operation.

use plan_model::ReadyToRevise;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Subscription handle for the revision-readiness signal
#[derive(Debug)]
pub struct RevisionWatcher {
    handle: JoinHandle<()>,
}

impl RevisionWatcher {
    /// Spawn a watcher over the given readiness receiver
    ///
    /// Must be called from within a tokio runtime. The watcher ends on
    /// its own once the sending side is dropped.
    #[must_use]
    pub fn spawn<F>(mut receiver: watch::Receiver<ReadyToRevise>, on_ready: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            while receiver.changed().await.is_ok() {
                let state = *receiver.borrow_and_update();
                if state.is_ready() {
                    on_ready();
                }
            }
        });
        Self { handle }
    }

    /// Stop reacting to the signal
    pub fn dispose(&self) {
        self.handle.abort();
    }

    /// Whether the watcher task has ended
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for RevisionWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
