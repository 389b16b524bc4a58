//! Analysis SR
//!
//! Stores named, optionally categorised numeric quantities in a structured
//! report and reads them back:
//! - Quantity registry with shape validation
//! - Hierarchical encoder (subtype path -> nested content items)
//! - Hierarchical decoder (content items -> flat quantities)
//! - DICOM JSON document builder and reader

pub mod analysis;
pub mod codes;
pub mod config;
pub mod decoder;
pub mod document;
pub mod encoder;
pub mod error;
pub mod quantity;
pub mod query;

// Re-exports for convenience
pub use analysis::{extract_all_values, AnalysisSrBuilder};
pub use config::SrConfig;
pub use decoder::HierarchicalDecoder;
pub use encoder::{ContentNode, HierarchicalEncoder};
pub use error::{Result, ShapeError, SrError};
pub use quantity::{Measurement, QuantityRegistry};
pub use query::find_by_name_and_optional_subtype;
