//! Persistence implementations
//!
//! File-based implementations of the domain repository traits.

mod file_event_repo;
mod file_snapshot_repo;

pub use file_event_repo::FileHaulEventRepository;
pub use file_snapshot_repo::FileSnapshotRepository;
