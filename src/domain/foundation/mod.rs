//! Foundation module - Shared domain primitives.
//!
//! Contains the error types that form the failure vocabulary of the
//! Pareto Decide domain.

mod errors;

pub use errors::{DomainError, ErrorCode, ValidationError};
