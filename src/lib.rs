//! Pareto Decide - Multi-criteria Pareto analysis for discrete candidates
//!
//! This crate ranks and explains trade-offs among candidate configurations
//! evaluated on several numeric criteria: the Pareto front and who dominates
//! whom, and along an ordering axis such as cost, sweet spots, traps, tier
//! transitions and per-segment bests.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
