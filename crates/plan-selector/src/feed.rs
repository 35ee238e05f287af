//! Upstream activity data source
//!
//! The feed is the one shared external resource a selector reads during
//! a revision. It is read-only from the engine's perspective and is
//! consumed behind `Arc<dyn ActivityFeed>` so owners can share a single
//! source across many selectors.

use plan_model::ActivityModel;

/// Read-only source of the authoritative activity list
pub trait ActivityFeed: Send + Sync {
    /// Current authoritative activities, in upstream order
    fn activities(&self) -> Vec<ActivityModel>;
}

/// A feed with no activities, backing detached selectors
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyFeed;

impl ActivityFeed for EmptyFeed {
    fn activities(&self) -> Vec<ActivityModel> {
        Vec::new()
    }
}
