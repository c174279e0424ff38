//! Error types for the haul-event engine harness
//!
//! The engine itself reports rule violations as plain strings in its result
//! records. These enums cover the surrounding I/O: config, snapshot files, CLI.

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Snapshot file errors (master data, requisitions, captured events)
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Unsupported snapshot format: {0} (expected .toml or .json)")]
    UnsupportedFormat(String),

    #[error("Failed to parse TOML snapshot: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Line {line} references unknown requisition {requisition}")]
    OrphanLine { line: String, requisition: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0} haul event(s) failed validation")]
    ValidationFailed(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
