//! Input adapters - Implementations of the InputLoader port.

mod serde_loader;

pub use serde_loader::SerdeInputLoader;
