//! Analysis-specific error types.
//!
//! Only configuration problems are errors. Degenerate inputs (empty
//! candidate sets, flat axes, zero denominators) are handled with
//! defined fallback values and never surface here.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised before any analysis computation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// No criteria were supplied.
    #[error("No criteria specified. Use maximize/minimize/criteria flags or structured input")]
    NoCriteria,

    /// Two criteria share the same name.
    #[error("Criterion '{0}' is declared more than once")]
    DuplicateCriterion(String),

    /// A criterion weight is not a finite positive number.
    #[error("Criterion '{name}' has invalid weight {weight}; weights must be finite and > 0")]
    InvalidWeight { name: String, weight: f64 },

    /// The candidate set was built for a different criterion list.
    #[error("Schema does not match the criteria (expected '{expected}', found '{found}')")]
    SchemaMismatch { expected: String, found: String },

    /// A builder argument could not be parsed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AnalysisError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::NoCriteria => ErrorCode::NoCriteria,
            AnalysisError::DuplicateCriterion(_) => ErrorCode::DuplicateCriterion,
            AnalysisError::InvalidWeight { .. } => ErrorCode::InvalidWeight,
            AnalysisError::SchemaMismatch { .. } => ErrorCode::InternalError,
            AnalysisError::Validation(_) => ErrorCode::ValidationFailed,
        }
    }
}

impl From<AnalysisError> for DomainError {
    fn from(err: AnalysisError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
