//! Plain-text review report

use acarreo_domain::service::AllocationStatus;

use crate::app::{summarize, EventReview};

pub fn generate_review_report(reviews: &[EventReview]) -> String {
    let summary = summarize(reviews);

    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("              Revisión de acarreos                 \n");
    report.push_str("              Haul Review Report                   \n");
    report.push_str("==================================================\n\n");
    report.push_str("【Resumen / Summary】\n");
    report.push_str(&format!("  Acarreos / Total events:        {}\n", summary.total));
    report.push_str(&format!("  Válidos / Valid:                {}\n", summary.valid));
    report.push_str(&format!("  Rechazados / Invalid:           {}\n", summary.invalid));
    report.push_str(&format!("  Informativos / Informational:   {}\n", summary.informational));
    report.push_str(&format!("  Con requisición / Allocated:    {}\n", summary.allocated));
    report.push('\n');

    report.push_str("【Acarreos / Events】\n");
    report.push_str("-".repeat(70).as_str());
    report.push('\n');
    report.push_str(&format!(
        "{:<12} {:<10} {:>9} {:>6} {:>6} {:<20}\n",
        "Event", "Status", "Quantity", "Errors", "Warns", "Requisition line"
    ));
    report.push_str("-".repeat(70).as_str());
    report.push('\n');
    for r in reviews {
        let validation = &r.review.validation;
        let status = match (validation.is_valid, validation.is_informational) {
            (false, _) => "INVALID",
            (true, true) => "INFO",
            (true, false) => "OK",
        };
        let quantity = r
            .event
            .quantity
            .map(|q| format!("{:.2}", q))
            .unwrap_or_else(|| "-".to_string());
        let line = match &r.review.allocation {
            Some(a) => match (&a.line, a.status) {
                (Some(line), AllocationStatus::Matched) => line.id.clone(),
                (_, AllocationStatus::NoAuthorizedRequisition) => "(no requisition)".to_string(),
                (_, AllocationStatus::NoAvailableBalance) => "(no balance)".to_string(),
                (_, _) => "(exceeds balance)".to_string(),
            },
            None => "-".to_string(),
        };
        report.push_str(&format!(
            "{:<12} {:<10} {:>9} {:>6} {:>6} {:<20}\n",
            truncate_str(&r.label, 11),
            status,
            quantity,
            validation.errors.len(),
            validation.warnings.len(),
            truncate_str(&line, 20)
        ));
    }
    report.push('\n');

    let with_notes: Vec<&EventReview> = reviews
        .iter()
        .filter(|r| {
            let v = &r.review.validation;
            !v.errors.is_empty()
                || !v.warnings.is_empty()
                || r.review.allocation.as_ref().is_some_and(|a| !a.is_match())
        })
        .collect();

    if with_notes.is_empty() {
        report.push_str("【Sin observaciones / No findings】\n");
        report.push_str("  All events passed every rule.\n\n");
    } else {
        report.push_str("【Observaciones / Findings】\n");
        for r in with_notes {
            report.push_str(&format!("  {}\n", r.label));
            for e in &r.review.validation.errors {
                report.push_str(&format!("    ERROR  {}\n", e));
            }
            for w in &r.review.validation.warnings {
                report.push_str(&format!("    WARN   {}\n", w));
            }
            if let Some(a) = r.review.allocation.as_ref().filter(|a| !a.is_match()) {
                report.push_str(&format!("    ALLOC  {}\n", a.reason));
            }
        }
        report.push('\n');
    }

    report.push_str("==================================================\n");
    report
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acarreo_domain::model::HaulEvent;
    use acarreo_domain::service::{AllocationResult, HaulReview, ValidationResult};

    fn review(label: &str, errors: &[&str], allocation: Option<AllocationResult>) -> EventReview {
        EventReview {
            label: label.to_string(),
            event: HaulEvent {
                quantity: Some(7.0),
                ..Default::default()
            },
            review: HaulReview {
                validation: ValidationResult {
                    is_valid: errors.is_empty(),
                    errors: errors.iter().map(|s| s.to_string()).collect(),
                    warnings: Vec::new(),
                    is_informational: false,
                },
                allocation,
            },
        }
    }

    #[test]
    fn test_report_lists_findings() {
        let failed = AllocationResult {
            requisition: None,
            line: None,
            reason: "no authorized requisitions for this site (OBRA-1)".to_string(),
            status: AllocationStatus::NoAuthorizedRequisition,
        };
        let reviews = vec![
            review("AC-1", &[], None),
            review("AC-2", &["Submitting user is required"], Some(failed)),
        ];
        let report = generate_review_report(&reviews);
        assert!(report.contains("Haul Review Report"));
        assert!(report.contains("INVALID"));
        assert!(report.contains("ERROR  Submitting user is required"));
        assert!(report.contains("ALLOC  no authorized requisitions"));
        assert!(report.contains("(no requisition)"));
    }

    #[test]
    fn test_report_without_findings() {
        let report = generate_review_report(&[review("AC-1", &[], None)]);
        assert!(report.contains("No findings"));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("AC-2026-000123", 11), "AC-2026-0..");
        assert_eq!(truncate_str("AC-1", 11), "AC-1");
    }
}
