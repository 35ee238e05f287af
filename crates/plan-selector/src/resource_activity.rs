//! Resource-activity selector
//!
//! Second instantiation of the reconciliation engine: a picker over the
//! activities one resource worked on in one time slot. Targets are
//! derived from the upstream [`ActivityFeed`]; a readiness signal
//! triggers selection-preserving revisions so activity names refresh
//! without disturbing what the user has picked.

use crate::engine::{SelectionChange, SelectionEngine};
use crate::error::SelectorError;
use crate::feed::{ActivityFeed, EmptyFeed};
use crate::item::SelectableResourceActivity;
use crate::watcher::RevisionWatcher;
use indexmap::IndexMap;
use parking_lot::Mutex;
use plan_collection::ListenerId;
use plan_model::{
    ActivityId, DisplayConfig, ReadyToRevise, ResourceActivityTrackerModel, ResourceId,
    ResourceTrackerModel,
};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Picker over the activities a resource worked on in one time slot
pub struct ResourceActivitySelector {
    engine: SelectionEngine<SelectableResourceActivity>,
    feed: Arc<dyn ActivityFeed>,
    resource_id: ResourceId,
    time: i32,
    watcher: Mutex<Option<RevisionWatcher>>,
}

impl ResourceActivitySelector {
    /// Create a selector and subscribe it to the readiness signal
    ///
    /// Seeds targets from the supplied tracker model merged with the
    /// current feed contents, then revises on every observed
    /// [`ReadyToRevise::Yes`]. Must be called from within a tokio
    /// runtime.
    #[must_use]
    pub fn new(
        feed: Arc<dyn ActivityFeed>,
        tracker: &ResourceTrackerModel,
        ready: watch::Receiver<ReadyToRevise>,
        config: &DisplayConfig,
    ) -> Arc<Self> {
        let selector = Self::detached(feed, tracker, config);

        let weak = Arc::downgrade(&selector);
        let watcher = RevisionWatcher::spawn(ready, move || {
            if let Some(selector) = weak.upgrade() {
                if let Err(error) = selector.revise() {
                    tracing::warn!(%error, "revision skipped");
                }
            }
        });
        *selector.watcher.lock() = Some(watcher);

        selector
    }

    /// Create a selector with no readiness subscription
    #[must_use]
    pub fn detached(
        feed: Arc<dyn ActivityFeed>,
        tracker: &ResourceTrackerModel,
        config: &DisplayConfig,
    ) -> Arc<Self> {
        let selector = Arc::new(Self {
            engine: SelectionEngine::with_config(config),
            feed,
            resource_id: tracker.resource_id,
            time: tracker.time,
            watcher: Mutex::new(None),
        });
        selector.seed(&tracker.activity_trackers);
        selector
    }

    /// An inert selector over an empty feed
    #[must_use]
    pub fn empty(config: &DisplayConfig) -> Arc<Self> {
        Self::detached(
            Arc::new(EmptyFeed),
            &ResourceTrackerModel::new(0, ResourceId(0)),
            config,
        )
    }

    /// Initial set up: supplied trackers mark the selection, and win
    /// over the zero-percentage trackers generated for the rest of the
    /// feed's activities.
    fn seed(&self, trackers: &[ResourceActivityTrackerModel]) {
        let selected: HashSet<ActivityId> =
            trackers.iter().map(|tracker| tracker.activity_id).collect();

        let mut merged: IndexMap<ActivityId, ResourceActivityTrackerModel> =
            IndexMap::with_capacity(trackers.len());
        for tracker in trackers {
            merged.insert(tracker.activity_id, tracker.clone());
        }
        for fresh in self.fresh_trackers() {
            merged.entry(fresh.activity_id).or_insert(fresh);
        }

        let targets: Vec<ResourceActivityTrackerModel> = merged.into_values().collect();
        // A freshly constructed engine cannot already be disposed.
        let _ = self.engine.set_targets(&targets, &selected);
    }

    /// One zero-percentage tracker per activity currently in the feed
    fn fresh_trackers(&self) -> Vec<ResourceActivityTrackerModel> {
        self.feed
            .activities()
            .into_iter()
            .map(|activity| {
                ResourceActivityTrackerModel::unworked(
                    self.time,
                    self.resource_id,
                    activity.id,
                    activity.name,
                )
            })
            .collect()
    }

    /// Re-derive targets from the upstream feed, preserving selection
    ///
    /// # Errors
    /// Returns [`SelectorError::Disposed`] if the selector has been
    /// disposed.
    pub fn revise(&self) -> Result<(), SelectorError> {
        self.engine.revise_with(&self.fresh_trackers())
    }

    /// Converge to an explicit tracker list
    ///
    /// # Errors
    /// Returns [`SelectorError::Disposed`] if the selector has been
    /// disposed.
    pub fn set_targets(
        &self,
        trackers: &[ResourceActivityTrackerModel],
        selected: &HashSet<ActivityId>,
    ) -> Result<(), SelectorError> {
        self.engine.set_targets(trackers, selected)
    }

    /// Resource this selector belongs to
    #[inline]
    #[must_use]
    pub fn resource_id(&self) -> ResourceId {
        self.resource_id
    }

    /// Time slot this selector covers
    #[inline]
    #[must_use]
    pub fn time(&self) -> i32 {
        self.time
    }

    /// Ordered snapshot of all target activities, ascending by id
    #[must_use]
    pub fn target_items(&self) -> Vec<Arc<SelectableResourceActivity>> {
        self.engine.target_items()
    }

    /// Snapshot of the selected activities
    #[must_use]
    pub fn selected_items(&self) -> Vec<Arc<SelectableResourceActivity>> {
        self.engine.selected_items()
    }

    /// Ids of the currently selected activities
    #[must_use]
    pub fn selected_activity_ids(&self) -> Vec<ActivityId> {
        self.engine.selected_keys()
    }

    /// Selected activities' names joined with the shared separator
    #[must_use]
    pub fn target_items_string(&self) -> String {
        self.engine.target_items_string()
    }

    /// Toggle one activity's selection flag
    ///
    /// # Errors
    /// Returns [`SelectorError::Disposed`] if the selector has been
    /// disposed.
    pub fn set_selected(&self, id: ActivityId, selected: bool) -> Result<bool, SelectorError> {
        self.engine.set_selected(id, selected)
    }

    /// Register a change listener
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&SelectionChange) + Send + Sync + 'static,
    {
        self.engine.subscribe(listener)
    }

    /// Detach a change listener
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.engine.unsubscribe(id)
    }

    /// Release every target and empty both collections
    pub fn clear_targets(&self) {
        self.engine.clear_targets();
    }

    /// Deselect everything without removing any target
    pub fn clear_selected(&self) {
        self.engine.clear_selected();
    }

    /// Release the readiness subscription and all owned items
    ///
    /// Idempotent; a second call is a no-op.
    pub fn dispose(&self) {
        if let Some(watcher) = self.watcher.lock().take() {
            watcher.dispose();
        }
        self.engine.dispose();
    }

    /// Whether the selector has been disposed
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.engine.is_disposed()
    }
}

impl fmt::Display for ResourceActivitySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.target_items_string())
    }
}

impl fmt::Debug for ResourceActivitySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceActivitySelector")
            .field("resource_id", &self.resource_id)
            .field("time", &self.time)
            .field("targets", &self.engine.len())
            .finish_non_exhaustive()
    }
}
