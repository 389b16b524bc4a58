//! Error types
//!
//! Every fallible operation in the crate returns [`SrError`]. Shape problems
//! with incoming measurements carry their own enum so callers can match on
//! the exact defect.

use thiserror::Error;

pub type Result<T, E = SrError> = std::result::Result<T, E>;

/// A measurement did not have the expected `(name, subtypes, value, unit)` shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error(
        "item {index}: value must have exactly 4 elements \
         (name, list of subtypes, value, unit), got {found}"
    )]
    Arity { index: usize, found: usize },
    #[error("item {index}: value must be a list or an object with name, subtypes, value and unit")]
    NotAStructure { index: usize },
    #[error("item {index}: name must be a string")]
    Name { index: usize },
    #[error("item {index}: name must not be empty")]
    EmptyName { index: usize },
    #[error("item {index}: subtypes must be a list")]
    Subtypes { index: usize },
    #[error("item {index}: subtype at position {position} must be a string")]
    SubtypeLabel { index: usize, position: usize },
    #[error("item {index}: value must be a number")]
    Value { index: usize },
    #[error("item {index}: value must be finite")]
    NonFinite { index: usize },
    #[error("item {index}: unit must be a string")]
    Unit { index: usize },
    #[error("item {index}: unit must not be empty")]
    EmptyUnit { index: usize },
}

#[derive(Error, Debug)]
pub enum SrError {
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error("SR not built yet")]
    NotBuilt,
    #[error("subtype nesting exceeds the maximum depth of {max}")]
    DepthExceeded { max: usize },
    #[error("malformed content item: {field} ({tag}) is missing or invalid")]
    Decode { field: &'static str, tag: &'static str },
    #[error("query error: {0}")]
    Query(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
}
