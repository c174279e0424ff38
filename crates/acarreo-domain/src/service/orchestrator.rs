//! Haul-event validation entry point
//!
//! `validate_haul_event` is what the capture flow calls before persisting a
//! trip. Allocation is a separate, advisory step: `review_haul_event` runs both
//! and returns them side by side without letting an allocation failure change
//! the validity of the event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{HaulEvent, Material, Requisition, RequisitionLine, Route, Truck};
use crate::service::allocator::{allocate, AllocationCriteria, AllocationRequest, AllocationResult};
use crate::service::outcome::{RuleOutcome, ValidationResult};
use crate::service::rules::{self, RuleSettings};

/// Master-data records referenced by an event, as resolved by the caller
#[derive(Debug, Clone, Copy, Default)]
pub struct HaulContext<'a> {
    pub route: Option<&'a Route>,
    pub truck: Option<&'a Truck>,
    pub material: Option<&'a Material>,
}

/// Rule and allocation settings for one engine run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(default)]
    pub rules: RuleSettings,
    #[serde(default)]
    pub allocation: AllocationCriteria,
}

/// Validation plus the advisory allocation suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HaulReview {
    pub validation: ValidationResult,
    /// `None` when site, material or quantity is missing
    pub allocation: Option<AllocationResult>,
}

pub fn validate_haul_event(
    event: &HaulEvent,
    context: &HaulContext<'_>,
    settings: &RuleSettings,
    now: DateTime<Utc>,
) -> ValidationResult {
    let mut outcomes = vec![
        rules::check_completeness(event),
        check_references(event, context),
    ];

    if let Some(route) = context.route {
        outcomes.push(rules::check_route_compatibility(
            route,
            event.effective_direction(),
            settings.direction_policy,
        ));
    }

    if let (Some(material), Some(truck)) = (context.material, context.truck) {
        outcomes.push(rules::check_material_truck(material, truck));
    }

    if let (Some(quantity), Some(truck)) = (event.quantity, context.truck) {
        outcomes.push(rules::check_quantity_capacity(quantity, truck, settings));
    }

    if let Some(captured_at) = event.captured_at {
        outcomes.push(rules::check_timestamp(captured_at, now, settings));
    }

    let mut outcome: RuleOutcome = outcomes.into_iter().collect();

    let mut is_informational = false;
    if let Some(route) = context.route {
        let check = rules::detect_informational(route, event);
        is_informational = check.is_informational;
        outcome = outcome.merge(check.outcome);
    }

    let result = ValidationResult::from_outcome(outcome, is_informational);
    debug!(
        event = event.label_or("-"),
        valid = result.is_valid,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        informational = result.is_informational,
        "validated haul event"
    );
    result
}

pub fn review_haul_event(
    event: &HaulEvent,
    context: &HaulContext<'_>,
    requisitions: &[Requisition],
    lines: &[RequisitionLine],
    settings: &EngineSettings,
    now: DateTime<Utc>,
) -> HaulReview {
    let validation = validate_haul_event(event, context, &settings.rules, now);
    let allocation = AllocationRequest::from_event(event)
        .map(|request| allocate(&request, requisitions, lines, settings.allocation));

    HaulReview {
        validation,
        allocation,
    }
}

/// Present references whose records the caller could not resolve
fn check_references(event: &HaulEvent, context: &HaulContext<'_>) -> RuleOutcome {
    let mut outcome = RuleOutcome::new();
    let references = [
        ("Route", event.route_ref.as_deref(), context.route.is_some()),
        ("Truck", event.truck_ref.as_deref(), context.truck.is_some()),
        ("Material", event.material_ref.as_deref(), context.material.is_some()),
    ];
    for (kind, reference, resolved) in references {
        match reference {
            Some(id) if !id.trim().is_empty() && !resolved => {
                outcome.error(format!("{} {} was not found in master data", kind, id));
            }
            _ => {}
        }
    }
    outcome
}
