//! File-based implementation of the master data and requisition repositories

use std::path::{Path, PathBuf};

use acarreo_domain::model::{Material, Requisition, RequisitionLine, Route, Truck};
use acarreo_domain::repository::{MasterDataRepository, RequisitionRepository};
use acarreo_types::Error;

use crate::snapshot_loader::SnapshotLoader;

/// Snapshot-file repository (TOML or JSON)
pub struct FileSnapshotRepository {
    path: PathBuf,
    loader: SnapshotLoader,
}

impl FileSnapshotRepository {
    /// Open a repository from a snapshot file path
    pub fn new(path: PathBuf) -> Result<Self, Error> {
        let loader = SnapshotLoader::load_from_file(&path)?;
        Ok(Self { path, loader })
    }

    /// Get the snapshot path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reload data from the snapshot file
    pub fn reload(&mut self) -> Result<(), Error> {
        self.loader = SnapshotLoader::load_from_file(&self.path)?;
        Ok(())
    }

    /// Borrow the loaded snapshot
    pub fn snapshot(&self) -> &SnapshotLoader {
        &self.loader
    }
}

impl MasterDataRepository for FileSnapshotRepository {
    fn find_route(&self, id: &str) -> Result<Option<Route>, Error> {
        Ok(self.loader.get_route(id).cloned())
    }

    fn find_truck(&self, id: &str) -> Result<Option<Truck>, Error> {
        Ok(self.loader.get_truck(id).cloned())
    }

    fn find_material(&self, id: &str) -> Result<Option<Material>, Error> {
        Ok(self.loader.get_material(id).cloned())
    }
}

impl RequisitionRepository for FileSnapshotRepository {
    fn find_by_site(&self, site_ref: &str) -> Result<Vec<Requisition>, Error> {
        Ok(self
            .loader
            .requisitions_for_site(site_ref)
            .into_iter()
            .cloned()
            .collect())
    }

    fn find_lines(&self, requisition_refs: &[String]) -> Result<Vec<RequisitionLine>, Error> {
        Ok(self
            .loader
            .lines_for(requisition_refs)
            .into_iter()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SNAPSHOT: &str = r#"
[[routes]]
id = "R-1"
haul_type = "entrada"

[[requisitions]]
id = "REQ-1"
site_ref = "OBRA-1"
authorized = true
submitted_at = "2026-03-01T08:00:00Z"

[[requisitions]]
id = "REQ-2"
site_ref = "OBRA-2"
authorized = true
submitted_at = "2026-03-01T09:00:00Z"

[[lines]]
id = "L-1"
requisition_ref = "REQ-1"
material_ref = "GRAVA"
ordered_quantity = 30.0

[[lines]]
id = "L-2"
requisition_ref = "REQ-2"
material_ref = "GRAVA"
ordered_quantity = 10.0
"#;

    #[test]
    fn test_open_and_query() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.toml");
        fs::write(&path, SNAPSHOT).unwrap();

        let repo = FileSnapshotRepository::new(path).unwrap();
        assert!(repo.find_route("R-1").unwrap().is_some());
        assert!(repo.find_truck("T-1").unwrap().is_none());

        let requisitions = repo.find_by_site("OBRA-1").unwrap();
        assert_eq!(requisitions.len(), 1);

        let ids: Vec<String> = requisitions.iter().map(|r| r.id.clone()).collect();
        let lines = repo.find_lines(&ids).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, "L-1");
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.toml");
        fs::write(&path, SNAPSHOT).unwrap();

        let mut repo = FileSnapshotRepository::new(path.clone()).unwrap();
        assert_eq!(repo.snapshot().lines().len(), 2);

        fs::write(&path, "").unwrap();
        repo.reload().unwrap();
        assert!(repo.snapshot().lines().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = FileSnapshotRepository::new(dir.path().join("missing.json"));
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
