//! Application use cases

pub mod review_service;

pub use review_service::{
    review_events, suggest_allocation, summarize, EventReview, ReviewSummary,
};
