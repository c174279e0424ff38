//! Haul-event validation and requisition allocation
//!
//! Pure, stateless logic: every operation takes full in-memory snapshots and
//! returns plain result records. Nothing here performs I/O or keeps state
//! between calls.

pub mod model;
pub mod repository;
pub mod service;
