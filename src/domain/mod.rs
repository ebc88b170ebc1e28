//! Domain layer containing the analysis engine and its shared types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (errors, error codes)
//! - `analysis` - Pure domain services for Pareto decision analysis

pub mod analysis;
pub mod foundation;
