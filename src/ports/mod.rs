//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Input Ports
//!
//! - `InputLoader` - Reads candidate records and structured metadata

mod input_loader;

pub use input_loader::{InputFormat, InputLoader, LoadError, LoadedInput};
