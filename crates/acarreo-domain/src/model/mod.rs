//! Domain model types

pub mod haul_event;
pub mod material;
pub mod requisition;
pub mod route;
pub mod truck;

pub use haul_event::{Direction, HaulEvent};
pub use material::Material;
pub use requisition::{Requisition, RequisitionLine};
pub use route::{HaulType, Route};
pub use truck::Truck;
