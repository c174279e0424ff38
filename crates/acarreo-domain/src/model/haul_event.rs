//! Haul event (acarreo): one captured truck trip

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Effective direction of a haul event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Truck is loaded with material at a place (extracción)
    Extraction,
    /// Truck unloads material at a place (depósito / tiro)
    Deposit,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Extraction => write!(f, "extraction"),
            Direction::Deposit => write!(f, "deposit"),
        }
    }
}

/// A captured haul event, as assembled by the capture flow
///
/// Every caller-supplied attribute except the two direction flags is optional
/// so that incomplete captures can be reported field by field. The
/// informational flag is not stored here: it is computed during validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HaulEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub site_ref: Option<String>,      // obra
    #[serde(default)]
    pub route_ref: Option<String>,
    #[serde(default)]
    pub truck_ref: Option<String>,
    #[serde(default)]
    pub material_ref: Option<String>,
    #[serde(default)]
    pub carrier_ref: Option<String>,   // transportista
    #[serde(default)]
    pub is_extraction: bool,
    #[serde(default)]
    pub is_deposit: bool,
    /// Captured quantity, in the site's unit (m3, t...)
    #[serde(default)]
    pub quantity: Option<f64>,
    /// Load as a percentage of truck capacity
    #[serde(default)]
    pub load_percentage: Option<f64>,
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub submitted_by: Option<String>,
    /// Requisition line this trip was charged against, once linked
    #[serde(default)]
    pub requisition_line_ref: Option<String>,
}

impl HaulEvent {
    /// Effective direction: extraction if flagged, deposit otherwise
    pub fn effective_direction(&self) -> Direction {
        if self.is_extraction {
            Direction::Extraction
        } else {
            Direction::Deposit
        }
    }

    pub fn has_direction(&self) -> bool {
        self.is_extraction || self.is_deposit
    }

    /// Label for reports: id if known, otherwise the given fallback
    pub fn label_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.id.as_deref().unwrap_or(fallback)
    }
}
