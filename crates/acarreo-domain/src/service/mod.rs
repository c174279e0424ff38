//! Domain services

pub mod allocator;
pub mod load_conversion;
pub mod orchestrator;
pub mod outcome;
pub mod rules;

pub use allocator::{
    allocate, AllocationCriteria, AllocationRequest, AllocationResult, AllocationStatus,
};
pub use load_conversion::{percentage_from_quantity, quantity_from_percentage};
pub use orchestrator::{
    review_haul_event, validate_haul_event, EngineSettings, HaulContext, HaulReview,
};
pub use outcome::{RuleOutcome, ValidationResult};
pub use rules::{DirectionPolicy, RuleSettings};
