//! Testing utilities for the plan workspace
//!
//! Shared fixtures and fakes for selector tests.

#![allow(missing_docs)]

use parking_lot::Mutex;
use plan_model::{
    ActivityId, ActivityModel, ResourceActivityTrackerModel, ResourceId, ResourceModel,
    ResourceTrackerModel,
};
use plan_selector::ActivityFeed;

/// Build a resource with default cost and active state.
pub fn resource(id: u32, name: &str) -> ResourceModel {
    ResourceModel::new(ResourceId(id), name)
}

/// Build several resources from `(id, name)` pairs.
pub fn resources(entries: &[(u32, &str)]) -> Vec<ResourceModel> {
    entries
        .iter()
        .map(|(id, name)| resource(*id, name))
        .collect()
}

/// Build an activity.
pub fn activity(id: u32, name: &str) -> ActivityModel {
    ActivityModel::new(ActivityId(id), name)
}

/// Build several activities from `(id, name)` pairs.
pub fn activities(entries: &[(u32, &str)]) -> Vec<ActivityModel> {
    entries
        .iter()
        .map(|(id, name)| activity(*id, name))
        .collect()
}

/// Build an activity tracker for resource 1 at time 0.
pub fn activity_tracker(activity_id: u32, name: &str, percentage: i32) -> ResourceActivityTrackerModel {
    ResourceActivityTrackerModel::unworked(0, ResourceId(1), ActivityId(activity_id), name)
        .with_percentage_worked(percentage)
}

/// Build a tracker model for resource 1 at time 0 from the given
/// activity trackers.
pub fn resource_tracker(trackers: Vec<ResourceActivityTrackerModel>) -> ResourceTrackerModel {
    let mut model = ResourceTrackerModel::new(0, ResourceId(1));
    model.activity_trackers = trackers;
    model
}

/// In-memory activity feed whose contents can change between revisions.
#[derive(Debug, Default)]
pub struct StaticActivityFeed {
    activities: Mutex<Vec<ActivityModel>>,
}

impl StaticActivityFeed {
    pub fn new(activities: Vec<ActivityModel>) -> Self {
        Self {
            activities: Mutex::new(activities),
        }
    }

    /// Replace the published activity list.
    pub fn set(&self, activities: Vec<ActivityModel>) {
        *self.activities.lock() = activities;
    }
}

impl ActivityFeed for StaticActivityFeed {
    fn activities(&self) -> Vec<ActivityModel> {
        self.activities.lock().clone()
    }
}
