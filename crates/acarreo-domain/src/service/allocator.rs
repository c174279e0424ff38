//! Requisition allocation (FIFO over authorized requisition lines)
//!
//! Picks the single oldest line with unconsumed balance for the event's site
//! and material. If the captured quantity does not fit in that line the match
//! fails: there is no fallback to the next-oldest line and no splitting across
//! lines. The search is read-only; applying the allocation is up to the caller.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{HaulEvent, Requisition, RequisitionLine};

/// The part of a haul event the allocator needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub site_ref: String,
    pub material_ref: String,
    pub quantity: f64,
    #[serde(default)]
    pub carrier_ref: Option<String>,
}

impl AllocationRequest {
    /// Build a request from a captured event
    ///
    /// Returns `None` if site, material or quantity is missing.
    pub fn from_event(event: &HaulEvent) -> Option<Self> {
        Some(Self {
            site_ref: event.site_ref.clone()?,
            material_ref: event.material_ref.clone()?,
            quantity: event.quantity?,
            carrier_ref: event.carrier_ref.clone(),
        })
    }
}

/// Slack for float noise in snapshot balances (0.3 - 0.1 must still hold 0.2)
const BALANCE_TOLERANCE: f64 = 1e-9;

/// Optional filter criteria applied to requisitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationCriteria {
    /// Only consider requisitions placed with the event's carrier.
    /// Requisitions without a carrier match any carrier, and a request
    /// without a carrier matches every requisition.
    #[serde(default)]
    pub match_carrier: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    Matched,
    NoAuthorizedRequisition,
    NoAvailableBalance,
    ExceedsBalance,
}

/// Allocation suggestion; `requisition` and `line` are `None` on failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationResult {
    pub requisition: Option<Requisition>,
    pub line: Option<RequisitionLine>,
    pub reason: String,
    pub status: AllocationStatus,
}

impl AllocationResult {
    fn failure(status: AllocationStatus, reason: String) -> Self {
        Self {
            requisition: None,
            line: None,
            reason,
            status,
        }
    }

    pub fn is_match(&self) -> bool {
        self.status == AllocationStatus::Matched
    }
}

pub fn allocate(
    request: &AllocationRequest,
    requisitions: &[Requisition],
    lines: &[RequisitionLine],
    criteria: AllocationCriteria,
) -> AllocationResult {
    let carrier = if criteria.match_carrier {
        request.carrier_ref.as_deref()
    } else {
        None
    };

    let eligible: HashMap<&str, &Requisition> = requisitions
        .iter()
        .filter(|r| r.authorized && r.site_ref == request.site_ref)
        .filter(|r| match (carrier, r.carrier_ref.as_deref()) {
            (Some(wanted), Some(placed_with)) => wanted == placed_with,
            _ => true,
        })
        .map(|r| (r.id.as_str(), r))
        .collect();

    debug!(
        site = %request.site_ref,
        carrier = ?carrier,
        eligible = eligible.len(),
        "filtered authorized requisitions"
    );

    if eligible.is_empty() {
        return AllocationResult::failure(
            AllocationStatus::NoAuthorizedRequisition,
            format!("no authorized requisitions for this site ({})", request.site_ref),
        );
    }

    let mut candidates: Vec<(&Requisition, &RequisitionLine)> = lines
        .iter()
        .filter(|line| {
            line.material_ref == request.material_ref
                && line.remaining_balance() > BALANCE_TOLERANCE
        })
        .filter_map(|line| {
            eligible
                .get(line.requisition_ref.as_str())
                .map(|requisition| (*requisition, line))
        })
        .collect();

    if candidates.is_empty() {
        return AllocationResult::failure(
            AllocationStatus::NoAvailableBalance,
            format!(
                "no line with available balance for this material ({})",
                request.material_ref
            ),
        );
    }

    // Stable sort: equal timestamps keep input order
    candidates.sort_by_key(|(requisition, _)| requisition.submitted_at);
    let (requisition, line) = candidates[0];
    let balance = line.remaining_balance();

    debug!(
        requisition = %requisition.id,
        line = %line.id,
        balance,
        quantity = request.quantity,
        candidates = candidates.len(),
        "selected oldest requisition line"
    );

    if request.quantity.is_nan() || request.quantity > balance + BALANCE_TOLERANCE {
        return AllocationResult::failure(
            AllocationStatus::ExceedsBalance,
            format!(
                "quantity {:.2} exceeds available balance {:.2} on line {} of requisition {} by {:.2}",
                request.quantity,
                balance,
                line.id,
                requisition.id,
                request.quantity - balance
            ),
        );
    }

    AllocationResult {
        requisition: Some(requisition.clone()),
        line: Some(line.clone()),
        reason: "match found".to_string(),
        status: AllocationStatus::Matched,
    }
}
