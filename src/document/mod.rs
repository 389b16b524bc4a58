//! Document Module
//!
//! Structured report content items, the JSON document builder, and the
//! reader used to load persisted reports back for decoding.

pub mod builder;
pub mod item;
pub mod reader;
pub mod tags;

pub use builder::{DocumentBuilder, JsonSrBuilder};
pub use item::{ContentItem, ContentValue, RelationshipType};
pub use reader::{quantity_items, read_dataset};
