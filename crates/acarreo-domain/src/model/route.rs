//! Route (ruta) and its haul-type classification

use serde::{Deserialize, Serialize};

/// Haul-type classification of a route (tipo de acarreo)
///
/// Parsed leniently from the free-text label stored on the route record.
/// Labels that match none of the known kinds are kept verbatim in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HaulType {
    /// Material brought to the site (entrada / suministro)
    BroughtToSite,
    /// Material removed from the site (salida / retiro)
    RemovedFromSite,
    /// Material moved between places inside the site (movimiento interno)
    InternalMovement,
    Unknown(String),
}

impl HaulType {
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();

        match normalized.as_str() {
            "brought_to_site" | "material_brought_to_site" | "inbound" | "entrada"
            | "suministro" | "acarreo_de_entrada" => HaulType::BroughtToSite,
            "removed_from_site" | "material_removed_from_site" | "outbound" | "salida"
            | "retiro" | "acarreo_de_salida" => HaulType::RemovedFromSite,
            "internal_movement" | "internal" | "interno" | "movimiento_interno" => {
                HaulType::InternalMovement
            }
            _ => HaulType::Unknown(label.trim().to_string()),
        }
    }

    /// Canonical label used in snapshots and reports
    pub fn label(&self) -> &str {
        match self {
            HaulType::BroughtToSite => "brought_to_site",
            HaulType::RemovedFromSite => "removed_from_site",
            HaulType::InternalMovement => "internal_movement",
            HaulType::Unknown(raw) => raw,
        }
    }

    /// Human-readable description for rule messages
    pub fn describe(&self) -> &str {
        match self {
            HaulType::BroughtToSite => "material brought to site",
            HaulType::RemovedFromSite => "material removed from site",
            HaulType::InternalMovement => "internal movement",
            HaulType::Unknown(raw) => raw,
        }
    }
}

impl From<String> for HaulType {
    fn from(label: String) -> Self {
        HaulType::from_label(&label)
    }
}

impl From<HaulType> for String {
    fn from(haul_type: HaulType) -> Self {
        haul_type.label().to_string()
    }
}

impl std::fmt::Display for HaulType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Directional haul path at a site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    /// Display name (e.g. "Banco 3 → Tiro norte")
    #[serde(default)]
    pub name: String,
    pub haul_type: HaulType,
    /// Origin (origen)
    #[serde(default)]
    pub origin: Option<String>,
    /// Destination (destino)
    #[serde(default)]
    pub destination: Option<String>,
}
