//! Conversion between captured quantity and load percentage
//!
//! The two functions round independently, so they are not exact inverses.
//! The capture flow uses whichever matches the field the operator edited last.

/// Quantity carried at `percentage` of `capacity`, rounded to 2 decimals
pub fn quantity_from_percentage(percentage: f64, capacity: f64) -> f64 {
    round_to(percentage / 100.0 * capacity, 2)
}

/// Load percentage of `quantity` over `capacity`, rounded to the nearest integer
///
/// Returns `None` when the capacity is not a positive number.
pub fn percentage_from_quantity(quantity: f64, capacity: f64) -> Option<f64> {
    if !(capacity.is_finite() && capacity > 0.0) {
        return None;
    }
    Some((quantity / capacity * 100.0).round())
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
