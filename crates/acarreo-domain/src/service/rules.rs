//! Haul-event rules
//!
//! Each rule is a pure function over the records it needs and returns a
//! [`RuleOutcome`]. Rules never short-circuit each other; the orchestrator
//! decides which ones apply and merges their outcomes.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Direction, HaulEvent, HaulType, Material, Route, Truck};
use crate::service::outcome::RuleOutcome;

/// Material names that indicate a liquid load
const LIQUID_KEYWORDS: &[&str] = &["agua", "water"];

/// Truck type words that indicate an open/dump body, matched as whole words
const OPEN_BODY_KEYWORDS: &[&str] = &["volteo", "dump", "abierto", "open"];

/// Which direction a one-way route rejects
///
/// `AsRecorded` rejects extraction on routes bringing material to the site and
/// deposit on routes removing material from it, matching the behaviour of the
/// capture flow in production. `Mirrored` rejects the opposite direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionPolicy {
    #[default]
    AsRecorded,
    Mirrored,
}

impl DirectionPolicy {
    /// Direction that violates a route of the given kind, if any
    pub fn rejected_direction(self, haul_type: &HaulType) -> Option<Direction> {
        let recorded = match haul_type {
            HaulType::BroughtToSite => Direction::Extraction,
            HaulType::RemovedFromSite => Direction::Deposit,
            HaulType::InternalMovement | HaulType::Unknown(_) => return None,
        };
        Some(match (self, recorded) {
            (DirectionPolicy::AsRecorded, d) => d,
            (DirectionPolicy::Mirrored, Direction::Extraction) => Direction::Deposit,
            (DirectionPolicy::Mirrored, Direction::Deposit) => Direction::Extraction,
        })
    }
}

impl std::fmt::Display for DirectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectionPolicy::AsRecorded => write!(f, "as_recorded"),
            DirectionPolicy::Mirrored => write!(f, "mirrored"),
        }
    }
}

impl std::str::FromStr for DirectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "as_recorded" => Ok(DirectionPolicy::AsRecorded),
            "mirrored" => Ok(DirectionPolicy::Mirrored),
            other => Err(format!("unknown direction policy: {}", other)),
        }
    }
}

/// Tunable limits used by the rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSettings {
    /// Loads above this share of capacity get a near-full warning
    #[serde(default = "default_near_full_ratio")]
    pub near_full_ratio: f64,

    /// Loads below this share of capacity get a low-load warning
    #[serde(default = "default_low_load_ratio")]
    pub low_load_ratio: f64,

    /// Captures older than this get a stale-timestamp warning
    #[serde(default = "default_max_age_hours")]
    pub max_age_hours: u32,

    #[serde(default)]
    pub direction_policy: DirectionPolicy,
}

fn default_near_full_ratio() -> f64 {
    0.95
}

fn default_low_load_ratio() -> f64 {
    0.10
}

fn default_max_age_hours() -> u32 {
    24
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            near_full_ratio: default_near_full_ratio(),
            low_load_ratio: default_low_load_ratio(),
            max_age_hours: default_max_age_hours(),
            direction_policy: DirectionPolicy::default(),
        }
    }
}

/// Route classification vs. event direction
pub fn check_route_compatibility(
    route: &Route,
    direction: Direction,
    policy: DirectionPolicy,
) -> RuleOutcome {
    let mut outcome = RuleOutcome::new();
    match &route.haul_type {
        haul_type @ (HaulType::BroughtToSite | HaulType::RemovedFromSite) => {
            if policy.rejected_direction(haul_type) == Some(direction) {
                outcome.error(format!(
                    "Route {} is classified as {}; a {} haul is not accepted on it",
                    route_label(route),
                    haul_type.describe(),
                    direction
                ));
            }
        }
        HaulType::InternalMovement => {
            outcome.warning(format!(
                "Route {} is an internal movement: only the extraction leg counts for reconciliation",
                route_label(route)
            ));
        }
        HaulType::Unknown(raw) => {
            outcome.warning(format!(
                "Route {} has an unrecognized haul type '{}'; direction was not checked",
                route_label(route),
                raw
            ));
        }
    }
    outcome
}

/// Material vs. truck body compatibility
pub fn check_material_truck(material: &Material, truck: &Truck) -> RuleOutcome {
    let mut outcome = RuleOutcome::new();

    let is_liquid = contains_any(&material.name, LIQUID_KEYWORDS);
    let is_open_body = [truck.truck_type.as_deref(), truck.type_ref.as_deref()]
        .into_iter()
        .flatten()
        .any(|t| contains_word(t, OPEN_BODY_KEYWORDS));

    if is_liquid && is_open_body {
        outcome.error(format!(
            "Material '{}' is a liquid and cannot be hauled in open dump truck {}",
            material.name,
            truck.label()
        ));
    } else if material.classification_ref.is_some() && truck.type_ref.is_some() {
        outcome.warning(format!(
            "Check the compatibility table for material '{}' and truck type {}",
            material.name,
            truck.type_ref.as_deref().unwrap_or_default()
        ));
    }

    outcome
}

/// Captured quantity vs. truck capacity
pub fn check_quantity_capacity(quantity: f64, truck: &Truck, settings: &RuleSettings) -> RuleOutcome {
    let mut outcome = RuleOutcome::new();
    let capacity = truck.capacity;

    let capacity_valid = capacity.is_finite() && capacity > 0.0;
    if !capacity_valid {
        outcome.error(format!(
            "Truck {} has no valid capacity ({})",
            truck.label(),
            capacity
        ));
    }

    if !quantity.is_finite() {
        outcome.error(format!("Quantity must be a finite number (got {})", quantity));
    } else if quantity <= 0.0 {
        outcome.error(format!("Quantity must be greater than zero (got {:.2})", quantity));
    }
    if !outcome.is_valid() {
        return outcome;
    }

    if quantity > capacity {
        outcome.error(format!(
            "Quantity {:.2} exceeds capacity {:.2} of truck {} by {:.2}",
            quantity,
            capacity,
            truck.label(),
            quantity - capacity
        ));
    } else if quantity > capacity * settings.near_full_ratio {
        outcome.warning(format!(
            "Quantity {:.2} is above {:.0}% of truck {} capacity ({:.2})",
            quantity,
            settings.near_full_ratio * 100.0,
            truck.label(),
            capacity
        ));
    } else if quantity < capacity * settings.low_load_ratio {
        outcome.warning(format!(
            "Quantity {:.2} is below {:.0}% of truck {} capacity ({:.2})",
            quantity,
            settings.low_load_ratio * 100.0,
            truck.label(),
            capacity
        ));
    }

    outcome
}

/// Required fields and flag combinations
pub fn check_completeness(event: &HaulEvent) -> RuleOutcome {
    let mut outcome = RuleOutcome::new();

    let required_refs = [
        ("Site", &event.site_ref),
        ("Route", &event.route_ref),
        ("Truck", &event.truck_ref),
        ("Material", &event.material_ref),
    ];
    for (field, value) in required_refs {
        if is_blank(value) {
            outcome.error(format!("{} is required", field));
        }
    }

    if event.quantity.is_none() {
        outcome.error("Quantity is required");
    }

    match event.load_percentage {
        None => outcome.error("Load percentage is required"),
        Some(pct) if !(0.0..=100.0).contains(&pct) => {
            outcome.error(format!("Load percentage must be between 0 and 100 (got {})", pct))
        }
        Some(_) => {}
    }

    if is_blank(&event.submitted_by) {
        outcome.error("Submitting user is required");
    }

    if event.captured_at.is_none() {
        outcome.error("Capture timestamp is required");
    }

    if !event.has_direction() {
        outcome.error("Haul must be marked as extraction, deposit, or both");
    }

    outcome
}

/// Capture timestamp relative to `now`; warnings only
pub fn check_timestamp(
    captured_at: DateTime<Utc>,
    now: DateTime<Utc>,
    settings: &RuleSettings,
) -> RuleOutcome {
    let mut outcome = RuleOutcome::new();

    if captured_at > now {
        outcome.warning(format!(
            "Capture timestamp {} is in the future",
            captured_at.to_rfc3339()
        ));
    } else if now - captured_at > Duration::hours(i64::from(settings.max_age_hours)) {
        outcome.warning(format!(
            "Capture timestamp {} is more than {} hours old",
            captured_at.to_rfc3339(),
            settings.max_age_hours
        ));
    }

    outcome
}

/// Informational-trip detection result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InformationalCheck {
    pub is_informational: bool,
    pub outcome: RuleOutcome,
}

/// Deposit leg of an internal movement: valid, but outside reconciliation
pub fn detect_informational(route: &Route, event: &HaulEvent) -> InformationalCheck {
    let mut outcome = RuleOutcome::new();
    let is_informational = route.haul_type == HaulType::InternalMovement && event.is_deposit;

    if is_informational {
        outcome.warning(format!(
            "Deposit on internal movement route {} is informational only and does not affect reconciliation totals",
            route_label(route)
        ));
    }

    InformationalCheck {
        is_informational,
        outcome,
    }
}

fn route_label(route: &Route) -> String {
    if route.name.trim().is_empty() {
        format!("'{}'", route.id)
    } else {
        format!("'{}'", route.name)
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

fn contains_word(text: &str, keywords: &[&str]) -> bool {
    text.split(|c: char| !c.is_alphabetic())
        .any(|word| keywords.iter().any(|k| word.eq_ignore_ascii_case(k)))
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}
