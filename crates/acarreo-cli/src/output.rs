//! Output formatting module

use acarreo_app::app::{summarize, EventReview};
use acarreo_app::report::generate_review_report;
use acarreo_domain::service::AllocationResult;
use acarreo_types::{OutputFormat, Result};
use serde::Serialize;

#[derive(Serialize)]
struct ReviewOutput<'a> {
    summary: acarreo_app::app::ReviewSummary,
    events: &'a [EventReview],
}

pub fn output_reviews(output_format: OutputFormat, reviews: &[EventReview]) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&ReviewOutput {
            summary: summarize(reviews),
            events: reviews,
        })?;
        println!("{}", content);
    } else {
        print!("{}", generate_review_report(reviews));
    }
    Ok(())
}

pub fn output_allocation(output_format: OutputFormat, result: &AllocationResult) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("\nAllocation Result");
    println!("=================");
    println!("Matched:         {}", if result.is_match() { "Yes" } else { "No" });
    if let Some(ref requisition) = result.requisition {
        println!("Requisition:     {}", requisition.id);
        println!("Submitted:       {}", requisition.submitted_at.format("%Y-%m-%d %H:%M"));
    }
    if let Some(ref line) = result.line {
        println!("Line:            {}", line.id);
        println!("Balance:         {:.2}", line.remaining_balance());
    }
    println!("Reason:          {}", result.reason);
    Ok(())
}

#[derive(Serialize)]
pub struct Conversion {
    pub capacity: f64,
    pub quantity: Option<f64>,
    pub percentage: Option<f64>,
}

pub fn output_conversion(output_format: OutputFormat, conversion: &Conversion) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(conversion)?);
        return Ok(());
    }

    println!("Capacity:        {:.2}", conversion.capacity);
    match conversion.quantity {
        Some(q) => println!("Quantity:        {:.2}", q),
        None => println!("Quantity:        -"),
    }
    match conversion.percentage {
        Some(p) => println!("Load:            {:.0}%", p),
        None => println!("Load:            - (capacity must be positive)"),
    }
    Ok(())
}
