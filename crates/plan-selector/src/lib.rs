//! Plan Selector - target/selection reconciliation
//!
//! Keeps two dependent ordered collections (all selectable items, and
//! the currently selected subset) consistent with an externally
//! supplied authoritative item list, across repeated asynchronously
//! triggered revisions. One generic engine serves every item kind:
//!
//! - [`SelectionEngine`]: the four-phase reconciliation algorithm
//! - [`SelectableItem`]: the seam an item kind implements
//! - [`ResourceSelector`] / [`ResourceActivitySelector`]: the two
//!   concrete pickers
//! - [`RevisionWatcher`]: bridges the readiness signal to `revise()`
//!
//! # Example
//!
//! ```rust,ignore
//! use plan_model::{DisplayConfig, ResourceId, ResourceModel};
//! use plan_selector::ResourceSelector;
//! use std::collections::HashSet;
//!
//! let selector = ResourceSelector::new(&DisplayConfig::new());
//! let targets = vec![ResourceModel::new(ResourceId(1), "Fitter")];
//! let selected: HashSet<ResourceId> = [ResourceId(1)].into();
//!
//! selector.set_targets(&targets, &selected)?;
//! assert_eq!(selector.target_items_string(), "Fitter");
//! ```

#![warn(unreachable_pub)]

mod engine;
mod error;
mod feed;
mod item;
mod resource;
mod resource_activity;
mod watcher;

// Re-exports
pub use engine::{SelectionChange, SelectionEngine};
pub use error::SelectorError;
pub use feed::{ActivityFeed, EmptyFeed};
pub use item::{SelectableItem, SelectableResource, SelectableResourceActivity};
pub use resource::ResourceSelector;
pub use resource_activity::ResourceActivitySelector;
pub use watcher::RevisionWatcher;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
