//! Synchronous change notification
//!
//! Provides [`ChangeNotifier`], an explicit observer list. Listeners are
//! registered with [`ChangeNotifier::subscribe`], invoked synchronously
//! by [`ChangeNotifier::emit`], and detached with
//! [`ChangeNotifier::unsubscribe`] or [`ChangeNotifier::clear`].
//!
//! Emission snapshots the listener list before invoking anything, so a
//! listener may subscribe or unsubscribe from inside its own callback
//! without deadlocking.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Handle identifying a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Observer list with synchronous emission
pub struct ChangeNotifier<E> {
    listeners: Mutex<Vec<(ListenerId, Listener<E>)>>,
    next_id: AtomicU64,
}

impl<E> ChangeNotifier<E> {
    /// Create an empty notifier
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register a listener and return its handle
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Detach the listener with the given handle
    ///
    /// # Returns
    /// `true` if a listener was removed; `false` if the handle was
    /// already detached.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    /// Invoke every registered listener with the given event
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<Listener<E>> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in snapshot {
            (*listener)(event);
        }
    }

    /// Detach all listeners
    #[inline]
    pub fn clear(&self) {
        self.listeners.lock().clear();
    }

    /// Number of registered listeners
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Check whether any listener is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.lock().is_empty()
    }
}

impl<E> Default for ChangeNotifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for ChangeNotifier<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.len())
            .finish()
    }
}
