//! Plan Model - domain source models for the selection core
//!
//! Defines the immutable inputs the reconciliation engine consumes:
//! - Typed identifiers ([`ResourceId`], [`ActivityId`])
//! - Resource and activity source models
//! - Resource-activity tracker models
//! - The revision-readiness signal value ([`ReadyToRevise`])
//! - Shared display configuration ([`DisplayConfig`])
//!
//! Source models are owned by the caller; the selection engine never
//! mutates them and derives its own item wrappers from them.

#![warn(unreachable_pub)]

pub mod config;
pub mod ids;
pub mod models;
pub mod signal;

// Re-exports for convenience
pub use config::DisplayConfig;
pub use ids::{ActivityId, ResourceId};
pub use models::{
    ActivityModel, ResourceActivityTrackerModel, ResourceModel, ResourceSettingsModel,
    ResourceTrackerModel,
};
pub use signal::ReadyToRevise;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
