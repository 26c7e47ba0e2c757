//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic construction/parse failures. Outcomes
/// like "id not found" or "nothing matched" are reported results, not errors,
/// and never appear here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Raw input failed to parse into a domain value (e.g. a malformed
    /// `YYYY-MM-DD` expiry date, or a non-numeric price at the input
    /// boundary). No partial value is constructed.
    #[error("parse error: {0}")]
    Parse(String),
}

impl DomainError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
