//! Rule outcomes and the merged validation result

use serde::{Deserialize, Serialize};

/// Errors (blocking) and warnings (advisory) produced by one rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl RuleOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Concatenate two outcomes, keeping order (associative)
    pub fn merge(mut self, other: RuleOutcome) -> RuleOutcome {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self
    }
}

impl FromIterator<RuleOutcome> for RuleOutcome {
    fn from_iter<I: IntoIterator<Item = RuleOutcome>>(iter: I) -> Self {
        iter.into_iter().fold(RuleOutcome::new(), RuleOutcome::merge)
    }
}

/// Result of validating one haul event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Trip is valid but excluded from reconciliation totals
    pub is_informational: bool,
}

impl ValidationResult {
    pub fn from_outcome(outcome: RuleOutcome, is_informational: bool) -> Self {
        Self {
            is_valid: outcome.is_valid(),
            errors: outcome.errors,
            warnings: outcome.warnings,
            is_informational,
        }
    }
}
