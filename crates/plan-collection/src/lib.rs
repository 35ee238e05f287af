//! Plan Collection - containers for the selection core
//!
//! Provides the two building blocks the reconciliation engine sits on:
//! - [`UniqueCollection`]: an ordered container enforcing one entry per
//!   identity key, with O(1) key lookup and stable in-place sorting
//! - [`ChangeNotifier`]: an explicit observer list with synchronous
//!   emission and handle-based unregistration

#![warn(unreachable_pub)]

mod notify;
mod unique;

// Re-exports
pub use notify::{ChangeNotifier, ListenerId};
pub use unique::UniqueCollection;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
