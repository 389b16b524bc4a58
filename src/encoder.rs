//! Hierarchical Encoder
//!
//! Turns a flat list of measurements into a tree of content nodes by
//! partitioning on one subtype level at a time.
//!
//! At each level, measurements whose path is exhausted become a leaf group:
//! one name marker (taken from the first of them) followed by one value marker
//! each. The remaining measurements are bucketed by their label at this level,
//! in first-seen order, and each bucket becomes a category node.

use std::collections::HashMap;
use tracing::warn;

use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::{Result, SrError};
use crate::quantity::Measurement;

#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    Category {
        /// 0 for a top-level quantity type, >0 for nested subtypes
        level: usize,
        label: String,
        children: Vec<ContentNode>,
    },
    Name { text: String },
    Value { value: f64, unit: String },
}

impl ContentNode {
    pub fn is_top_level(&self) -> bool {
        matches!(self, ContentNode::Category { level: 0, .. })
    }
}

#[derive(Debug, Clone)]
pub struct HierarchicalEncoder {
    max_depth: usize,
}

impl Default for HierarchicalEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl HierarchicalEncoder {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn encode(&self, measurements: &[Measurement]) -> Result<Vec<ContentNode>> {
        let all: Vec<&Measurement> = measurements.iter().collect();
        self.encode_level(&all, 0)
    }

    fn encode_level(
        &self,
        measurements: &[&Measurement],
        depth: usize,
    ) -> Result<Vec<ContentNode>> {
        let mut leaves = Vec::new();
        let mut leaf_name: Option<&str> = None;
        let mut buckets: Vec<(&str, Vec<&Measurement>)> = Vec::new();
        let mut bucket_index: HashMap<&str, usize> = HashMap::new();

        for &measurement in measurements {
            match measurement.subtypes.get(depth) {
                Some(label) => {
                    if depth >= self.max_depth {
                        return Err(SrError::DepthExceeded { max: self.max_depth });
                    }
                    match bucket_index.get(label.as_str()) {
                        Some(&i) => buckets[i].1.push(measurement),
                        None => {
                            bucket_index.insert(label.as_str(), buckets.len());
                            buckets.push((label.as_str(), vec![measurement]));
                        }
                    }
                }
                None => {
                    match leaf_name {
                        None => {
                            leaf_name = Some(measurement.name.as_str());
                            leaves.push(ContentNode::Name { text: measurement.name.clone() });
                        }
                        Some(name) if name != measurement.name => {
                            warn!(
                                "'{}' shares subtype path {:?} with '{}' and will be stored \
                                 under '{}'",
                                measurement.name, measurement.subtypes, name, name
                            );
                        }
                        Some(_) => {}
                    }
                    leaves.push(ContentNode::Value {
                        value: measurement.value,
                        unit: measurement.unit.clone(),
                    });
                }
            }
        }

        let mut nodes = leaves;
        for (label, bucket) in buckets {
            nodes.push(ContentNode::Category {
                level: depth,
                label: label.to_string(),
                children: self.encode_level(&bucket, depth + 1)?,
            });
        }
        Ok(nodes)
    }
}
