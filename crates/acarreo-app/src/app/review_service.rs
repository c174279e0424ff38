//! Review Service - validate captured haul events and suggest allocations
//!
//! For each event this service:
//! 1. Resolves the route, truck and material the event references
//! 2. Loads the requisitions and lines visible to the event's site
//! 3. Runs validation and the advisory allocation search
//!
//! Nothing is written back: applying an allocation to the line balance is the
//! responsibility of whoever owns the document store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use acarreo_domain::model::HaulEvent;
use acarreo_domain::repository::{MasterDataRepository, RequisitionRepository};
use acarreo_domain::service::{
    allocate, review_haul_event, AllocationCriteria, AllocationRequest, AllocationResult,
    EngineSettings, HaulContext, HaulReview,
};
use acarreo_types::Result;

/// Review of one captured event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventReview {
    /// Event id, or its 1-based position in the input when it has none
    pub label: String,
    pub event: HaulEvent,
    #[serde(flatten)]
    pub review: HaulReview,
}

/// Totals over a batch of reviews
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub informational: usize,
    pub allocated: usize,
}

/// Review every event against the repository snapshot
pub fn review_events<R>(
    repo: &R,
    events: &[HaulEvent],
    settings: &EngineSettings,
    now: DateTime<Utc>,
) -> Result<Vec<EventReview>>
where
    R: MasterDataRepository + RequisitionRepository,
{
    let mut reviews = Vec::with_capacity(events.len());

    for (index, event) in events.iter().enumerate() {
        let fallback = format!("#{}", index + 1);
        let label = event.label_or(&fallback).to_string();

        let route = lookup(event.route_ref.as_deref(), |id| repo.find_route(id))?;
        let truck = lookup(event.truck_ref.as_deref(), |id| repo.find_truck(id))?;
        let material = lookup(event.material_ref.as_deref(), |id| repo.find_material(id))?;
        let context = HaulContext {
            route: route.as_ref(),
            truck: truck.as_ref(),
            material: material.as_ref(),
        };

        let requisitions = match event.site_ref.as_deref() {
            Some(site) => repo.find_by_site(site)?,
            None => Vec::new(),
        };
        let requisition_refs: Vec<String> = requisitions.iter().map(|r| r.id.clone()).collect();
        let lines = repo.find_lines(&requisition_refs)?;

        debug!(
            event = %label,
            requisitions = requisitions.len(),
            lines = lines.len(),
            "reviewing haul event"
        );

        let review = review_haul_event(event, &context, &requisitions, &lines, settings, now);
        reviews.push(EventReview {
            label,
            event: event.clone(),
            review,
        });
    }

    let summary = summarize(&reviews);
    info!(
        total = summary.total,
        valid = summary.valid,
        invalid = summary.invalid,
        allocated = summary.allocated,
        "reviewed haul events"
    );

    Ok(reviews)
}

/// Suggest an allocation for a request without validating a full event
pub fn suggest_allocation<R>(
    repo: &R,
    request: &AllocationRequest,
    criteria: AllocationCriteria,
) -> Result<AllocationResult>
where
    R: RequisitionRepository,
{
    let requisitions = repo.find_by_site(&request.site_ref)?;
    let requisition_refs: Vec<String> = requisitions.iter().map(|r| r.id.clone()).collect();
    let lines = repo.find_lines(&requisition_refs)?;
    Ok(allocate(request, &requisitions, &lines, criteria))
}

pub fn summarize(reviews: &[EventReview]) -> ReviewSummary {
    let valid = reviews.iter().filter(|r| r.review.validation.is_valid).count();
    ReviewSummary {
        total: reviews.len(),
        valid,
        invalid: reviews.len() - valid,
        informational: reviews
            .iter()
            .filter(|r| r.review.validation.is_informational)
            .count(),
        allocated: reviews
            .iter()
            .filter(|r| r.review.allocation.as_ref().is_some_and(|a| a.is_match()))
            .count(),
    }
}

fn lookup<T>(
    reference: Option<&str>,
    find: impl FnOnce(&str) -> Result<Option<T>>,
) -> Result<Option<T>> {
    match reference {
        Some(id) if !id.trim().is_empty() => find(id),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acarreo_domain::model::{
        HaulType, Material, Requisition, RequisitionLine, Route, Truck,
    };
    use acarreo_types::Error;
    use chrono::TimeZone;

    /// In-memory repository for service tests
    struct MemoryRepo {
        routes: Vec<Route>,
        trucks: Vec<Truck>,
        materials: Vec<Material>,
        requisitions: Vec<Requisition>,
        lines: Vec<RequisitionLine>,
    }

    impl MasterDataRepository for MemoryRepo {
        fn find_route(&self, id: &str) -> std::result::Result<Option<Route>, Error> {
            Ok(self.routes.iter().find(|r| r.id == id).cloned())
        }

        fn find_truck(&self, id: &str) -> std::result::Result<Option<Truck>, Error> {
            Ok(self.trucks.iter().find(|t| t.id == id).cloned())
        }

        fn find_material(&self, id: &str) -> std::result::Result<Option<Material>, Error> {
            Ok(self.materials.iter().find(|m| m.id == id).cloned())
        }
    }

    impl RequisitionRepository for MemoryRepo {
        fn find_by_site(&self, site_ref: &str) -> std::result::Result<Vec<Requisition>, Error> {
            Ok(self
                .requisitions
                .iter()
                .filter(|r| r.site_ref == site_ref)
                .cloned()
                .collect())
        }

        fn find_lines(
            &self,
            requisition_refs: &[String],
        ) -> std::result::Result<Vec<RequisitionLine>, Error> {
            Ok(self
                .lines
                .iter()
                .filter(|l| requisition_refs.contains(&l.requisition_ref))
                .cloned()
                .collect())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    fn repo() -> MemoryRepo {
        MemoryRepo {
            routes: vec![Route {
                id: "R-1".to_string(),
                name: "Banco - Obra".to_string(),
                haul_type: HaulType::BroughtToSite,
                origin: None,
                destination: None,
            }],
            trucks: vec![Truck {
                id: "T-1".to_string(),
                capacity: 14.0,
                truck_type: Some("Volteo".to_string()),
                type_ref: None,
                plate: None,
                carrier_ref: None,
            }],
            materials: vec![Material {
                id: "GRAVA".to_string(),
                name: "Grava".to_string(),
                classification_ref: None,
            }],
            requisitions: vec![Requisition {
                id: "REQ-1".to_string(),
                site_ref: "OBRA-1".to_string(),
                authorized: true,
                submitted_at: Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap(),
                carrier_ref: None,
            }],
            lines: vec![RequisitionLine {
                id: "L-1".to_string(),
                requisition_ref: "REQ-1".to_string(),
                material_ref: "GRAVA".to_string(),
                ordered_quantity: 30.0,
                authorized_quantity: None,
                delivered_quantity: 10.0,
            }],
        }
    }

    fn event(quantity: f64) -> HaulEvent {
        HaulEvent {
            site_ref: Some("OBRA-1".to_string()),
            route_ref: Some("R-1".to_string()),
            truck_ref: Some("T-1".to_string()),
            material_ref: Some("GRAVA".to_string()),
            is_deposit: true,
            quantity: Some(quantity),
            load_percentage: Some(50.0),
            captured_at: Some(now() - chrono::Duration::hours(1)),
            submitted_by: Some("checador-01".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_review_valid_event_with_allocation() {
        let reviews =
            review_events(&repo(), &[event(7.0)], &EngineSettings::default(), now()).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].label, "#1");
        assert!(reviews[0].review.validation.is_valid);
        let allocation = reviews[0].review.allocation.as_ref().unwrap();
        assert!(allocation.is_match());
        assert_eq!(allocation.line.as_ref().unwrap().id, "L-1");
    }

    #[test]
    fn test_review_over_capacity_event() {
        let mut over = event(16.0);
        over.id = Some("AC-9".to_string());
        let reviews = review_events(&repo(), &[event(7.0), over], &EngineSettings::default(), now())
            .unwrap();
        assert_eq!(reviews[1].label, "AC-9");
        assert!(!reviews[1].review.validation.is_valid);
        // 16 fits the 20 left on L-1: the allocation suggestion is independent
        assert!(reviews[1].review.allocation.as_ref().unwrap().is_match());

        let summary = summarize(&reviews);
        assert_eq!(
            summary,
            ReviewSummary {
                total: 2,
                valid: 1,
                invalid: 1,
                informational: 0,
                allocated: 2,
            }
        );
    }

    #[test]
    fn test_review_unknown_references() {
        let mut e = event(7.0);
        e.truck_ref = Some("T-404".to_string());
        let reviews = review_events(&repo(), &[e], &EngineSettings::default(), now()).unwrap();
        let validation = &reviews[0].review.validation;
        assert!(!validation.is_valid);
        assert!(validation.errors.iter().any(|e| e.contains("T-404")));
    }

    #[test]
    fn test_suggest_allocation() {
        let request = AllocationRequest {
            site_ref: "OBRA-1".to_string(),
            material_ref: "GRAVA".to_string(),
            quantity: 25.0,
            carrier_ref: None,
        };
        let result = suggest_allocation(&repo(), &request, AllocationCriteria::default()).unwrap();
        assert!(!result.is_match());
        assert!(result.reason.contains("by 5.00"));
    }
}
