use serde::{Deserialize, Serialize};

/// Truck (camión) with its carrying capacity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Truck {
    pub id: String,
    /// Capacidad: maximum quantity it can carry, in the site's unit
    pub capacity: f64,
    /// Body type name (e.g. "Volteo 14 m3", "Pipa")
    #[serde(default)]
    pub truck_type: Option<String>,
    /// Catalog reference of the truck type
    #[serde(default)]
    pub type_ref: Option<String>,
    /// License plate (placas)
    #[serde(default)]
    pub plate: Option<String>,
    /// Carrier (transportista) operating the truck
    #[serde(default)]
    pub carrier_ref: Option<String>,
}

impl Truck {
    /// Display label: plate if known, otherwise id
    pub fn label(&self) -> &str {
        self.plate.as_deref().unwrap_or(&self.id)
    }
}
