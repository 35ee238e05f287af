//! Generic target/selection reconciliation engine
//!
//! One [`SelectionEngine`] keeps two dependent ordered collections (all
//! selectable items, and the currently selected subset) consistent with
//! an externally supplied authoritative item list. The same four-phase
//! algorithm serves every item kind via [`SelectableItem`].
//!
//! # Guarantees
//!
//! After any public operation returns:
//! - the target set holds exactly one item per distinct incoming key
//! - the selected set is a subset of the target set
//! - the target set is sorted ascending by key
//! - items removed by a reconciliation have been released exactly once
//!
//! # Thread safety
//!
//! All instance state sits behind one coarse mutex held for the duration
//! of each operation; no sub-operation interleaving is observable.
//! Change notifications fire after the lock is released.

use crate::error::SelectorError;
use crate::item::SelectableItem;
use indexmap::IndexMap;
use parking_lot::Mutex;
use plan_collection::{ChangeNotifier, ListenerId, UniqueCollection};
use plan_model::DisplayConfig;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

/// Change notifications raised after a completed mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// The target collection changed shape or content
    Targets,

    /// The derived joined-display-name string may have changed
    TargetsString,
}

/// Counts gathered while applying one reconciliation
#[derive(Debug, Default, Clone, Copy)]
struct ReconcileStats {
    removed: usize,
    deselected: usize,
    added: usize,
    refreshed: usize,
}

#[derive(Debug)]
struct EngineState<T: SelectableItem> {
    targets: UniqueCollection<T::Key, Arc<T>>,
    selected: UniqueCollection<T::Key, Arc<T>>,
    disposed: bool,
}

/// Reconciliation engine for one item kind
#[derive(Debug)]
pub struct SelectionEngine<T: SelectableItem> {
    state: Mutex<EngineState<T>>,
    notifier: ChangeNotifier<SelectionChange>,
    separator: String,
}

/// Ascending-by-key order for target items
fn key_ascending<T: SelectableItem>(a: &Arc<T>, b: &Arc<T>) -> Ordering {
    a.key().cmp(&b.key())
}

impl<T: SelectableItem> SelectionEngine<T> {
    /// Create an engine joining display names with the given separator
    #[must_use]
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(EngineState {
                targets: UniqueCollection::new(),
                selected: UniqueCollection::new(),
                disposed: false,
            }),
            notifier: ChangeNotifier::new(),
            separator: separator.into(),
        }
    }

    /// Create an engine from the shared display configuration
    #[must_use]
    pub fn with_config(config: &DisplayConfig) -> Self {
        Self::new(config.separator.clone())
    }

    /// Converge engine state to a new authoritative item list
    ///
    /// `incoming` need not be sorted or deduplicated; duplicate keys
    /// collapse to one logical item, the latest record winning for
    /// attribute updates. Keys in `selected_ids` that are absent from
    /// `incoming` are ignored.
    ///
    /// Emits one [`SelectionChange::Targets`] and one
    /// [`SelectionChange::TargetsString`] notification after all phases
    /// complete.
    ///
    /// # Errors
    /// Returns [`SelectorError::Disposed`] (before any mutation) if the
    /// engine has been disposed.
    pub fn set_targets(
        &self,
        incoming: &[T::Source],
        selected_ids: &HashSet<T::Key>,
    ) -> Result<(), SelectorError> {
        let stats = {
            let mut state = self.state.lock();
            if state.disposed {
                return Err(SelectorError::Disposed);
            }
            Self::reconcile(&mut state, incoming, selected_ids)
        };

        tracing::debug!(
            removed = stats.removed,
            deselected = stats.deselected,
            added = stats.added,
            refreshed = stats.refreshed,
            "targets reconciled"
        );

        self.notify_changed();
        Ok(())
    }

    /// Re-derive targets while preserving the current selection
    ///
    /// Equivalent to [`Self::set_targets`] with the keys of the
    /// currently selected items, so display attributes refresh without
    /// disturbing user selection state.
    ///
    /// # Errors
    /// Returns [`SelectorError::Disposed`] if the engine has been
    /// disposed.
    pub fn revise_with(&self, incoming: &[T::Source]) -> Result<(), SelectorError> {
        let stats = {
            let mut state = self.state.lock();
            if state.disposed {
                return Err(SelectorError::Disposed);
            }
            let selected_ids: HashSet<T::Key> = state
                .targets
                .values()
                .filter(|item| item.is_selected())
                .map(|item| item.key())
                .collect();
            Self::reconcile(&mut state, incoming, &selected_ids)
        };

        tracing::debug!(
            removed = stats.removed,
            added = stats.added,
            refreshed = stats.refreshed,
            "targets revised"
        );

        self.notify_changed();
        Ok(())
    }

    /// The four-phase reconciliation, applied under the instance lock
    fn reconcile(
        state: &mut EngineState<T>,
        incoming: &[T::Source],
        selected_ids: &HashSet<T::Key>,
    ) -> ReconcileStats {
        let mut incoming_by_key: IndexMap<T::Key, &T::Source> =
            IndexMap::with_capacity(incoming.len());
        for source in incoming {
            // Last-seen record wins; only one item per key survives.
            incoming_by_key.insert(T::source_key(source), source);
        }

        let mut stats = ReconcileStats::default();

        // Phase 1: drop targets no longer present upstream.
        let removed: Vec<T::Key> = state
            .targets
            .keys()
            .filter(|key| !incoming_by_key.contains_key(*key))
            .copied()
            .collect();
        for key in removed {
            if let Some(item) = state.targets.remove(&key) {
                state.selected.remove(&key);
                item.release();
                stats.removed += 1;
            }
        }

        // Phase 2: deselect items that remain targets but fell out of
        // the requested selection.
        let stale: Vec<T::Key> = state
            .selected
            .keys()
            .filter(|key| !selected_ids.contains(*key))
            .copied()
            .collect();
        for key in stale {
            if let Some(item) = state.selected.remove(&key) {
                item.set_selected(false);
                stats.deselected += 1;
            }
        }

        // Phase 3: create items for keys seen for the first time.
        for (key, source) in &incoming_by_key {
            if state.targets.contains(key) {
                continue;
            }
            let item = Arc::new(T::from_source(source, selected_ids.contains(key)));
            if item.is_selected() {
                state.selected.insert(*key, Arc::clone(&item));
            }
            state.targets.insert(*key, item);
            stats.added += 1;
        }

        // Phase 4: refresh display attributes on surviving items.
        for (key, item) in state.targets.iter() {
            if let Some(source) = incoming_by_key.get(key) {
                item.refresh(source);
                stats.refreshed += 1;
            }
        }

        state.targets.sort_by(key_ascending::<T>);

        stats
    }

    /// Toggle one item's selection flag
    ///
    /// Keeps the selected subset consistent with the flag under the same
    /// lock as every other mutation. Emits both change notifications
    /// when the flag actually flips.
    ///
    /// # Returns
    /// `Ok(false)` when the key is not a current target (no-op).
    ///
    /// # Errors
    /// Returns [`SelectorError::Disposed`] if the engine has been
    /// disposed.
    pub fn set_selected(&self, key: T::Key, selected: bool) -> Result<bool, SelectorError> {
        {
            let mut state = self.state.lock();
            if state.disposed {
                return Err(SelectorError::Disposed);
            }
            let Some(item) = state.targets.get(&key) else {
                return Ok(false);
            };
            if item.is_selected() == selected {
                // Already converged; nothing to notify.
                return Ok(true);
            }
            let item = Arc::clone(item);
            item.set_selected(selected);
            if selected {
                state.selected.insert(key, item);
            } else {
                state.selected.remove(&key);
            }
        }

        self.notify_changed();
        Ok(true)
    }

    /// Ordered snapshot of all target items, ascending by key
    #[must_use]
    pub fn target_items(&self) -> Vec<Arc<T>> {
        self.state.lock().targets.values().cloned().collect()
    }

    /// Snapshot of the selected subset
    #[must_use]
    pub fn selected_items(&self) -> Vec<Arc<T>> {
        self.state.lock().selected.values().cloned().collect()
    }

    /// Keys of the currently selected items, in target order
    #[must_use]
    pub fn selected_keys(&self) -> Vec<T::Key> {
        self.state
            .lock()
            .targets
            .values()
            .filter(|item| item.is_selected())
            .map(|item| item.key())
            .collect()
    }

    /// Selected items' display names joined with the separator
    #[must_use]
    pub fn target_items_string(&self) -> String {
        let names: Vec<String> = self
            .state
            .lock()
            .targets
            .values()
            .filter(|item| item.is_selected())
            .map(|item| item.display_name())
            .collect();
        names.join(&self.separator)
    }

    /// The configured display-name separator
    #[inline]
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Number of target items
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().targets.len()
    }

    /// Check whether the engine holds no targets
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().targets.is_empty()
    }

    /// Release every target item and empty both collections
    pub fn clear_targets(&self) {
        let mut state = self.state.lock();
        for (_, item) in state.targets.drain() {
            item.release();
        }
        state.selected.clear();
    }

    /// Deselect everything without removing any target
    pub fn clear_selected(&self) {
        let mut state = self.state.lock();
        for (_, item) in state.selected.drain() {
            item.set_selected(false);
        }
    }

    /// Register a change listener
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&SelectionChange) + Send + Sync + 'static,
    {
        self.notifier.subscribe(listener)
    }

    /// Detach a change listener
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Release all owned items and detach all listeners
    ///
    /// Idempotent; a second call is a no-op.
    pub fn dispose(&self) {
        {
            let mut state = self.state.lock();
            if state.disposed {
                return;
            }
            for (_, item) in state.targets.drain() {
                item.release();
            }
            state.selected.clear();
            state.disposed = true;
        }
        self.notifier.clear();
    }

    /// Whether the engine has been disposed
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.state.lock().disposed
    }

    fn notify_changed(&self) {
        self.notifier.emit(&SelectionChange::Targets);
        self.notifier.emit(&SelectionChange::TargetsString);
    }
}
