//! Material requisitions (requisiciones) and their line items

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authorized material order for a site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requisition {
    pub id: String,
    pub site_ref: String,
    #[serde(default)]
    pub authorized: bool,
    pub submitted_at: DateTime<Utc>,
    /// Carrier the order was placed with; `None` means any carrier
    #[serde(default)]
    pub carrier_ref: Option<String>,
}

/// One material/quantity entry within a requisition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequisitionLine {
    pub id: String,
    pub requisition_ref: String,
    pub material_ref: String,
    pub ordered_quantity: f64,
    /// Overrides the ordered quantity when set
    #[serde(default)]
    pub authorized_quantity: Option<f64>,
    #[serde(default)]
    pub delivered_quantity: f64,
}

impl RequisitionLine {
    /// Quantity the line may deliver in total
    pub fn effective_quantity(&self) -> f64 {
        self.authorized_quantity.unwrap_or(self.ordered_quantity)
    }

    /// Unconsumed balance, as read from the snapshot
    ///
    /// Not clamped: a snapshot with over-delivery yields a negative balance.
    /// The allocator compares it with a 1e-9 tolerance for float noise.
    pub fn remaining_balance(&self) -> f64 {
        self.effective_quantity() - self.delivered_quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(ordered: f64, authorized: Option<f64>, delivered: f64) -> RequisitionLine {
        RequisitionLine {
            id: "L-1".to_string(),
            requisition_ref: "REQ-1".to_string(),
            material_ref: "MAT-1".to_string(),
            ordered_quantity: ordered,
            authorized_quantity: authorized,
            delivered_quantity: delivered,
        }
    }

    #[test]
    fn test_remaining_uses_ordered_quantity() {
        assert!((line(30.0, None, 12.0).remaining_balance() - 18.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_authorized_quantity_overrides_ordered() {
        assert!((line(30.0, Some(20.0), 12.0).remaining_balance() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_remaining_not_clamped() {
        assert!(line(10.0, None, 14.0).remaining_balance() < 0.0);
    }
}
