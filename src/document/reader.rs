//! Document reader
//!
//! Loads a persisted report back into the generic JSON model and locates the
//! content items the decoder should walk.

use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use super::tags;
use crate::codes;
use crate::error::Result;

pub fn read_dataset(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    debug!("Reading dataset from {:?}", path);
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Content items holding encoded quantities.
///
/// When the top-level content sequence has quantity root containers, their
/// children are returned in document order; otherwise the top-level items are
/// returned as-is so trees written directly at the document root still decode.
/// A content sequence whose value is not a list is a decode error.
pub fn quantity_items(dataset: &Value) -> Result<Vec<Value>> {
    let Some(top) = tags::sequence_items(dataset, tags::CONTENT_SEQUENCE)? else {
        return Ok(Vec::new());
    };

    let roots: Vec<&Value> = top.iter().filter(|item| is_quantity_root(item)).collect();
    if roots.is_empty() {
        return Ok(top.to_vec());
    }

    let mut items = Vec::new();
    for root in roots {
        if let Some(children) = tags::sequence_items(root, tags::CONTENT_SEQUENCE)? {
            items.extend(children.iter().cloned());
        }
    }
    Ok(items)
}

fn is_quantity_root(item: &Value) -> bool {
    if tags::first_str(item, tags::VALUE_TYPE) != Some("CONTAINER") {
        return false;
    }
    tags::first_value(item, tags::CONCEPT_NAME_CODE_SEQUENCE)
        .and_then(|code| tags::first_str(code, tags::CODE_VALUE))
        == Some(codes::ROOT_CONTAINER.value)
}
