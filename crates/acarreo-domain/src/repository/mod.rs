//! Repository trait definitions for the records the engine reads
//!
//! The engine never calls these itself: callers use them to assemble the
//! snapshots handed to the rule and allocation functions.

use acarreo_types::Error;

use crate::model::{HaulEvent, Material, Requisition, RequisitionLine, Route, Truck};

/// Repository for master data (routes, trucks, materials)
pub trait MasterDataRepository {
    /// Find a route by id
    fn find_route(&self, id: &str) -> Result<Option<Route>, Error>;

    /// Find a truck by id
    fn find_truck(&self, id: &str) -> Result<Option<Truck>, Error>;

    /// Find a material by id
    fn find_material(&self, id: &str) -> Result<Option<Material>, Error>;
}

/// Repository for requisitions and their lines
pub trait RequisitionRepository {
    /// Find all requisitions for a site, authorized or not
    fn find_by_site(&self, site_ref: &str) -> Result<Vec<Requisition>, Error>;

    /// Find the lines of the given requisitions
    fn find_lines(&self, requisition_refs: &[String]) -> Result<Vec<RequisitionLine>, Error>;
}

/// Source of captured haul events awaiting validation
pub trait HaulEventSource {
    fn find_all(&self) -> Result<Vec<HaulEvent>, Error>;
}
