//! Repository adapters for the persistence layer

use std::path::PathBuf;

use acarreo_infra::persistence::{FileHaulEventRepository, FileSnapshotRepository};
use acarreo_types::Result;

/// Open the snapshot repository (master data and requisition balances)
pub fn open_snapshot_repo(path: PathBuf) -> Result<FileSnapshotRepository> {
    FileSnapshotRepository::new(path)
}

/// Open the captured haul event file
pub fn open_event_repo(path: PathBuf) -> FileHaulEventRepository {
    FileHaulEventRepository::new(path)
}
