//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `input` - JSON/YAML candidate loaders

pub mod input;

pub use input::SerdeInputLoader;
