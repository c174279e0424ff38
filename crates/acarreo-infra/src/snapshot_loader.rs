//! Snapshot loader for master data, requisitions and captured events
//!
//! Files are TOML or JSON, chosen by extension. A snapshot file holds the
//! arrays `routes`, `trucks`, `materials`, `requisitions` and `lines`; an
//! events file holds an `events` array. Missing arrays are treated as empty.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use acarreo_domain::model::{HaulEvent, Material, Requisition, RequisitionLine, Route, Truck};
use acarreo_types::{Error, Result, SnapshotError};

/// On-disk file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Toml,
    Json,
}

impl SnapshotFormat {
    /// Detect the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "toml" => Ok(SnapshotFormat::Toml),
            "json" => Ok(SnapshotFormat::Json),
            _ => Err(SnapshotError::UnsupportedFormat(path.display().to_string()).into()),
        }
    }
}

/// Container for parsing snapshot files
#[derive(Debug, Default, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    routes: Vec<Route>,
    #[serde(default)]
    trucks: Vec<Truck>,
    #[serde(default)]
    materials: Vec<Material>,
    #[serde(default)]
    requisitions: Vec<Requisition>,
    #[serde(default)]
    lines: Vec<RequisitionLine>,
}

/// Container for parsing captured event files
#[derive(Debug, Default, Deserialize)]
struct EventFile {
    #[serde(default)]
    events: Vec<HaulEvent>,
}

/// Master data and requisition balances loaded from one snapshot
#[derive(Debug, Default)]
pub struct SnapshotLoader {
    routes: HashMap<String, Route>,
    trucks: HashMap<String, Truck>,
    materials: HashMap<String, Material>,
    /// Kept in file order: the allocator's tie-break depends on it
    requisitions: Vec<Requisition>,
    lines: Vec<RequisitionLine>,
}

impl SnapshotLoader {
    /// Load a snapshot from a TOML or JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = SnapshotFormat::from_path(path)?;
        let content = read_file(path)?;
        let loader = Self::load_from_str(&content, format)?;
        info!(
            path = %path.display(),
            routes = loader.routes.len(),
            trucks = loader.trucks.len(),
            materials = loader.materials.len(),
            requisitions = loader.requisitions.len(),
            lines = loader.lines.len(),
            "loaded snapshot"
        );
        Ok(loader)
    }

    /// Load a snapshot from a string in the given format
    pub fn load_from_str(content: &str, format: SnapshotFormat) -> Result<Self> {
        let file: SnapshotFile = parse(content, format)?;

        let requisition_ids = unique_ids("requisition", file.requisitions.iter().map(|r| &r.id))?;
        unique_ids("line", file.lines.iter().map(|l| &l.id))?;
        if let Some(orphan) = file
            .lines
            .iter()
            .find(|l| !requisition_ids.contains(l.requisition_ref.as_str()))
        {
            return Err(SnapshotError::OrphanLine {
                line: orphan.id.clone(),
                requisition: orphan.requisition_ref.clone(),
            }
            .into());
        }

        Ok(Self {
            routes: index_by_id("route", file.routes, |r| &r.id)?,
            trucks: index_by_id("truck", file.trucks, |t| &t.id)?,
            materials: index_by_id("material", file.materials, |m| &m.id)?,
            requisitions: file.requisitions,
            lines: file.lines,
        })
    }

    pub fn get_route(&self, id: &str) -> Option<&Route> {
        self.routes.get(id)
    }

    pub fn get_truck(&self, id: &str) -> Option<&Truck> {
        self.trucks.get(id)
    }

    pub fn get_material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    /// All requisitions, in file order
    pub fn requisitions(&self) -> &[Requisition] {
        &self.requisitions
    }

    /// All requisition lines, in file order
    pub fn lines(&self) -> &[RequisitionLine] {
        &self.lines
    }

    /// Requisitions for one site, in file order
    pub fn requisitions_for_site(&self, site_ref: &str) -> Vec<&Requisition> {
        self.requisitions
            .iter()
            .filter(|r| r.site_ref == site_ref)
            .collect()
    }

    /// Lines belonging to any of the given requisitions, in file order
    pub fn lines_for(&self, requisition_refs: &[String]) -> Vec<&RequisitionLine> {
        let wanted: HashSet<&str> = requisition_refs.iter().map(String::as_str).collect();
        self.lines
            .iter()
            .filter(|l| wanted.contains(l.requisition_ref.as_str()))
            .collect()
    }
}

/// Load captured haul events from a TOML or JSON file
pub fn load_events_from_file(path: &Path) -> Result<Vec<HaulEvent>> {
    let format = SnapshotFormat::from_path(path)?;
    let content = read_file(path)?;
    let events = load_events_from_str(&content, format)?;
    info!(path = %path.display(), events = events.len(), "loaded haul events");
    Ok(events)
}

/// Load captured haul events from a string in the given format
pub fn load_events_from_str(content: &str, format: SnapshotFormat) -> Result<Vec<HaulEvent>> {
    let file: EventFile = parse(content, format)?;
    Ok(file.events)
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    Ok(fs::read_to_string(path)?)
}

fn parse<T: DeserializeOwned>(content: &str, format: SnapshotFormat) -> Result<T> {
    debug!(?format, bytes = content.len(), "parsing snapshot content");
    match format {
        SnapshotFormat::Toml => Ok(toml::from_str(content).map_err(SnapshotError::from)?),
        SnapshotFormat::Json => Ok(serde_json::from_str(content)?),
    }
}

fn unique_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a String>,
) -> Result<HashSet<&'a str>> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.as_str()) {
            return Err(SnapshotError::DuplicateId {
                kind,
                id: id.clone(),
            }
            .into());
        }
    }
    Ok(seen)
}

fn index_by_id<T>(
    kind: &'static str,
    records: Vec<T>,
    id_of: impl Fn(&T) -> &String,
) -> Result<HashMap<String, T>> {
    let mut map = HashMap::with_capacity(records.len());
    for record in records {
        let id = id_of(&record).clone();
        if map.contains_key(&id) {
            return Err(SnapshotError::DuplicateId { kind, id }.into());
        }
        map.insert(id, record);
    }
    Ok(map)
}
