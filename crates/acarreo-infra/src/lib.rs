//! Infrastructure layer - snapshot loaders and file-backed repositories
//!
//! Snapshot files stand in for the document store: they hold the master data
//! and requisition balances the engine reads, plus captured haul events.

pub mod persistence;
pub mod snapshot_loader;
