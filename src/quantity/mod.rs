//! Quantity Module
//!
//! Measurements and the registry that collects them before a build.

pub mod measurement;
pub mod registry;

pub use measurement::Measurement;
pub use registry::QuantityRegistry;
