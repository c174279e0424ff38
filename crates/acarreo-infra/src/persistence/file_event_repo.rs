//! File-based source of captured haul events

use std::path::PathBuf;

use acarreo_domain::model::HaulEvent;
use acarreo_domain::repository::HaulEventSource;
use acarreo_types::Error;

use crate::snapshot_loader::load_events_from_file;

/// Captured events read from a TOML or JSON file
pub struct FileHaulEventRepository {
    path: PathBuf,
}

impl FileHaulEventRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HaulEventSource for FileHaulEventRepository {
    fn find_all(&self) -> Result<Vec<HaulEvent>, Error> {
        load_events_from_file(&self.path)
    }
}
