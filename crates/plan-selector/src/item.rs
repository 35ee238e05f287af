//! Selectable item wrappers
//!
//! [`SelectableItem`] is the seam the reconciliation engine is generic
//! over: identity-key extraction, creation from a source record,
//! display-attribute refresh, the selection flag, and the release hook
//! invoked when an item leaves the target set.
//!
//! Items are shared as `Arc<T>` between the target and selected
//! collections, so object identity survives reconciliation. Mutable
//! fields use interior mutability; the engine's coarse lock serializes
//! all structural access.

use parking_lot::Mutex;
use plan_model::{ActivityId, ResourceActivityTrackerModel, ResourceId, ResourceModel};
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

/// An engine-owned wrapper around one selectable entity
pub trait SelectableItem: fmt::Debug + Send + Sync + 'static {
    /// Identity key type; stable across revisions
    type Key: Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync + 'static;

    /// Immutable source record items are derived from
    type Source;

    /// Extract the identity key from a source record
    fn source_key(source: &Self::Source) -> Self::Key;

    /// Create a new item from a source record
    fn from_source(source: &Self::Source, selected: bool) -> Self;

    /// Identity key of this item
    fn key(&self) -> Self::Key;

    /// Current display name
    fn display_name(&self) -> String;

    /// Whether the item is currently selected
    fn is_selected(&self) -> bool;

    /// Set the selection flag
    fn set_selected(&self, selected: bool);

    /// Overwrite mutable display attributes from a source record
    ///
    /// Selection state is never touched here; the engine converges it
    /// before this phase runs.
    fn refresh(&self, source: &Self::Source);

    /// Release the item once it leaves the target set
    ///
    /// Idempotent; a second call is a no-op.
    fn release(&self);
}

/// A resource offered for selection
#[derive(Debug)]
pub struct SelectableResource {
    id: ResourceId,
    name: Mutex<String>,
    selected: AtomicBool,
    released: AtomicBool,
}

impl SelectableResource {
    /// Identity key
    #[inline]
    #[must_use]
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Current display name
    #[must_use]
    pub fn name(&self) -> String {
        self.name.lock().clone()
    }

    /// Whether the item has been released
    #[inline]
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

impl SelectableItem for SelectableResource {
    type Key = ResourceId;
    type Source = ResourceModel;

    fn source_key(source: &Self::Source) -> Self::Key {
        source.id
    }

    fn from_source(source: &Self::Source, selected: bool) -> Self {
        Self {
            id: source.id,
            name: Mutex::new(source.name.clone()),
            selected: AtomicBool::new(selected),
            released: AtomicBool::new(false),
        }
    }

    fn key(&self) -> Self::Key {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.lock().clone()
    }

    fn is_selected(&self) -> bool {
        self.selected.load(Ordering::SeqCst)
    }

    fn set_selected(&self, selected: bool) {
        self.selected.store(selected, Ordering::SeqCst);
    }

    fn refresh(&self, source: &Self::Source) {
        *self.name.lock() = source.name.clone();
    }

    fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

/// One activity a resource may have worked on in one time slot
#[derive(Debug)]
pub struct SelectableResourceActivity {
    activity_id: ActivityId,
    resource_id: ResourceId,
    time: i32,
    name: Mutex<String>,
    percentage_worked: AtomicI32,
    selected: AtomicBool,
    released: AtomicBool,
}

impl SelectableResourceActivity {
    /// Identity key
    #[inline]
    #[must_use]
    pub fn activity_id(&self) -> ActivityId {
        self.activity_id
    }

    /// Resource the work belongs to
    #[inline]
    #[must_use]
    pub fn resource_id(&self) -> ResourceId {
        self.resource_id
    }

    /// Time slot index
    #[inline]
    #[must_use]
    pub fn time(&self) -> i32 {
        self.time
    }

    /// Current display name
    #[must_use]
    pub fn name(&self) -> String {
        self.name.lock().clone()
    }

    /// Percentage of the time slot spent on this activity
    #[inline]
    #[must_use]
    pub fn percentage_worked(&self) -> i32 {
        self.percentage_worked.load(Ordering::SeqCst)
    }

    /// Record the percentage worked (edited through the UI)
    #[inline]
    pub fn set_percentage_worked(&self, percentage: i32) {
        self.percentage_worked.store(percentage, Ordering::SeqCst);
    }

    /// Whether the item has been released
    #[inline]
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

impl SelectableItem for SelectableResourceActivity {
    type Key = ActivityId;
    type Source = ResourceActivityTrackerModel;

    fn source_key(source: &Self::Source) -> Self::Key {
        source.activity_id
    }

    fn from_source(source: &Self::Source, selected: bool) -> Self {
        Self {
            activity_id: source.activity_id,
            resource_id: source.resource_id,
            time: source.time,
            name: Mutex::new(source.activity_name.clone()),
            percentage_worked: AtomicI32::new(source.percentage_worked),
            selected: AtomicBool::new(selected),
            released: AtomicBool::new(false),
        }
    }

    fn key(&self) -> Self::Key {
        self.activity_id
    }

    fn display_name(&self) -> String {
        self.name.lock().clone()
    }

    fn is_selected(&self) -> bool {
        self.selected.load(Ordering::SeqCst)
    }

    fn set_selected(&self, selected: bool) {
        self.selected.store(selected, Ordering::SeqCst);
    }

    // Only the name tracks the incoming record; the recorded percentage
    // belongs to this item once created.
    fn refresh(&self, source: &Self::Source) {
        *self.name.lock() = source.activity_name.clone();
    }

    fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_item_from_source() {
        let model = ResourceModel::new(ResourceId(4), "Rigger");
        let item = SelectableResource::from_source(&model, true);

        assert_eq!(item.key(), ResourceId(4));
        assert_eq!(item.display_name(), "Rigger");
        assert!(item.is_selected());
        assert!(!item.is_released());
    }

    #[test]
    fn resource_item_refresh_updates_name_only() {
        let item =
            SelectableResource::from_source(&ResourceModel::new(ResourceId(4), "Rigger"), true);

        item.refresh(&ResourceModel::new(ResourceId(4), "Senior Rigger"));

        assert_eq!(item.display_name(), "Senior Rigger");
        assert!(item.is_selected());
    }

    #[test]
    fn resource_item_release_is_idempotent() {
        let item =
            SelectableResource::from_source(&ResourceModel::new(ResourceId(1), "A"), false);

        item.release();
        item.release();
        assert!(item.is_released());
    }

    #[test]
    fn activity_item_keeps_percentage_across_refresh() {
        let source = ResourceActivityTrackerModel::unworked(2, ResourceId(1), ActivityId(7), "Dig")
            .with_percentage_worked(60);
        let item = SelectableResourceActivity::from_source(&source, true);

        item.refresh(&ResourceActivityTrackerModel::unworked(
            2,
            ResourceId(1),
            ActivityId(7),
            "Dig trench",
        ));

        assert_eq!(item.display_name(), "Dig trench");
        assert_eq!(item.percentage_worked(), 60);
    }

    #[test]
    fn activity_item_percentage_is_editable() {
        let source = ResourceActivityTrackerModel::unworked(0, ResourceId(1), ActivityId(1), "A");
        let item = SelectableResourceActivity::from_source(&source, false);

        item.set_percentage_worked(25);
        assert_eq!(item.percentage_worked(), 25);
    }
}
