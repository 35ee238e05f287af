//! Source models consumed by the selection engine
//!
//! These records mirror what the surrounding application holds for
//! resources, activities, and per-resource activity trackers. The
//! engine treats them as read-only input and keys everything by the
//! typed ids in [`crate::ids`].

use crate::ids::{ActivityId, ResourceId};
use serde::{Deserialize, Serialize};

/// A resource available for allocation to activities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceModel {
    /// Identity key, stable across revisions
    pub id: ResourceId,

    /// Display name
    pub name: String,

    /// Cost per unit of work
    pub unit_cost: f64,

    /// Whether the resource is currently excluded from scheduling
    pub is_inactive: bool,
}

impl ResourceModel {
    /// Create a resource with the given id and name
    #[must_use]
    pub fn new(id: ResourceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            unit_cost: 0.0,
            is_inactive: false,
        }
    }

    /// Set the unit cost
    #[inline]
    #[must_use]
    pub fn with_unit_cost(mut self, unit_cost: f64) -> Self {
        self.unit_cost = unit_cost;
        self
    }

    /// Mark the resource inactive
    #[inline]
    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_inactive = true;
        self
    }
}

/// Resource settings held by the surrounding application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSettingsModel {
    /// All resources known to the plan
    pub resources: Vec<ResourceModel>,

    /// Unit cost applied to unnamed resources
    pub default_unit_cost: f64,

    /// Whether resource scheduling is disabled entirely
    pub are_disabled: bool,
}

/// An activity as published by the upstream data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityModel {
    /// Identity key, stable across revisions
    pub id: ActivityId,

    /// Display name
    pub name: String,
}

impl ActivityModel {
    /// Create an activity with the given id and name
    #[must_use]
    pub fn new(id: ActivityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Work recorded against one activity by one resource at one time slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceActivityTrackerModel {
    /// Time slot index
    pub time: i32,

    /// Resource doing the work
    pub resource_id: ResourceId,

    /// Activity worked on; the identity key for selection purposes
    pub activity_id: ActivityId,

    /// Display name of the activity at capture time
    pub activity_name: String,

    /// Percentage of the time slot spent on this activity
    pub percentage_worked: i32,
}

impl ResourceActivityTrackerModel {
    /// Create a tracker with zero percentage worked
    #[must_use]
    pub fn unworked(
        time: i32,
        resource_id: ResourceId,
        activity_id: ActivityId,
        activity_name: impl Into<String>,
    ) -> Self {
        Self {
            time,
            resource_id,
            activity_id,
            activity_name: activity_name.into(),
            percentage_worked: 0,
        }
    }

    /// Set the percentage worked
    #[inline]
    #[must_use]
    pub fn with_percentage_worked(mut self, percentage_worked: i32) -> Self {
        self.percentage_worked = percentage_worked;
        self
    }
}

/// All activity trackers for one resource at one time slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceTrackerModel {
    /// Time slot index
    pub time: i32,

    /// Resource the trackers belong to
    pub resource_id: ResourceId,

    /// Per-activity work records
    pub activity_trackers: Vec<ResourceActivityTrackerModel>,
}

impl ResourceTrackerModel {
    /// Create an empty tracker set for a resource/time slot
    #[must_use]
    pub fn new(time: i32, resource_id: ResourceId) -> Self {
        Self {
            time,
            resource_id,
            activity_trackers: Vec::new(),
        }
    }

    /// Append an activity tracker
    #[inline]
    #[must_use]
    pub fn with_tracker(mut self, tracker: ResourceActivityTrackerModel) -> Self {
        self.activity_trackers.push(tracker);
        self
    }
}
