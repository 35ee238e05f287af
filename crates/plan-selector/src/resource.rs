//! Resource selector
//!
//! First instantiation of the reconciliation engine: a picker over the
//! plan's resources. Targets are supplied explicitly by the owner
//! whenever resource settings change; no revision signal is involved.

use crate::engine::{SelectionChange, SelectionEngine};
use crate::error::SelectorError;
use crate::item::SelectableResource;
use plan_collection::ListenerId;
use plan_model::{DisplayConfig, ResourceId, ResourceModel, ResourceSettingsModel};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Picker over the plan's resources
#[derive(Debug)]
pub struct ResourceSelector {
    engine: SelectionEngine<SelectableResource>,
}

impl ResourceSelector {
    /// Create an empty selector
    #[must_use]
    pub fn new(config: &DisplayConfig) -> Self {
        Self {
            engine: SelectionEngine::with_config(config),
        }
    }

    /// Converge to a new authoritative resource list
    ///
    /// # Errors
    /// Returns [`SelectorError::Disposed`] if the selector has been
    /// disposed.
    pub fn set_targets(
        &self,
        targets: &[ResourceModel],
        selected: &HashSet<ResourceId>,
    ) -> Result<(), SelectorError> {
        self.engine.set_targets(targets, selected)
    }

    /// Converge to the resources carried by the given settings
    ///
    /// Convenience over [`Self::set_targets`] for owners that hold a
    /// [`ResourceSettingsModel`].
    ///
    /// # Errors
    /// Returns [`SelectorError::Disposed`] if the selector has been
    /// disposed.
    pub fn set_targets_from_settings(
        &self,
        settings: &ResourceSettingsModel,
        selected: &HashSet<ResourceId>,
    ) -> Result<(), SelectorError> {
        self.engine.set_targets(&settings.resources, selected)
    }

    /// Ordered snapshot of all target resources, ascending by id
    #[must_use]
    pub fn target_items(&self) -> Vec<Arc<SelectableResource>> {
        self.engine.target_items()
    }

    /// Snapshot of the selected resources
    #[must_use]
    pub fn selected_items(&self) -> Vec<Arc<SelectableResource>> {
        self.engine.selected_items()
    }

    /// Ids of the currently selected resources
    #[must_use]
    pub fn selected_ids(&self) -> Vec<ResourceId> {
        self.engine.selected_keys()
    }

    /// Selected resources' names joined with the shared separator
    #[must_use]
    pub fn target_items_string(&self) -> String {
        self.engine.target_items_string()
    }

    /// Names of the targets allocated to the given resources, ascending
    /// by id, joined with the shared separator
    #[must_use]
    pub fn allocated_to_string(&self, allocated: &HashSet<ResourceId>) -> String {
        let names: Vec<String> = self
            .engine
            .target_items()
            .iter()
            .filter(|item| allocated.contains(&item.id()))
            .map(|item| item.name())
            .collect();
        names.join(self.engine.separator())
    }

    /// Toggle one resource's selection flag
    ///
    /// # Errors
    /// Returns [`SelectorError::Disposed`] if the selector has been
    /// disposed.
    pub fn set_selected(&self, id: ResourceId, selected: bool) -> Result<bool, SelectorError> {
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

    /// Release all owned items and detach all listeners; idempotent
    pub fn dispose(&self) {
        self.engine.dispose();
    }

    /// Whether the selector has been disposed
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.engine.is_disposed()
    }
}

impl fmt::Display for ResourceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.target_items_string())
    }
}
