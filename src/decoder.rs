//! Hierarchical Decoder
//!
//! Flattens SR content items (DICOM JSON model) back into measurements.
//! Each item is classified into a closed set of kinds before dispatch;
//! kinds this crate does not write are skipped.

use serde_json::Value;

use crate::config::DEFAULT_MAX_DEPTH;
use crate::document::tags;
use crate::error::{Result, SrError};
use crate::quantity::Measurement;

#[derive(Debug, PartialEq)]
enum DecodedNode<'a> {
    Category { label: &'a str, children: &'a [Value] },
    Name(&'a str),
    Value { value: f64, unit: &'a str },
    Unknown,
}

fn missing(field: &'static str, tag: &'static str) -> SrError {
    SrError::Decode { field, tag }
}

impl<'a> DecodedNode<'a> {
    fn classify(item: &'a Value) -> Result<Self> {
        let node = match tags::first_str(item, tags::VALUE_TYPE) {
            Some("CODE") => {
                let label = tags::first_value(item, tags::CONCEPT_CODE_SEQUENCE)
                    .and_then(|code| tags::first_str(code, tags::CODE_MEANING))
                    .ok_or_else(|| {
                        missing("ConceptCodeSequence code meaning", tags::CONCEPT_CODE_SEQUENCE)
                    })?;
                let children = tags::sequence_items(item, tags::CONTENT_SEQUENCE)?.unwrap_or(&[]);
                DecodedNode::Category { label, children }
            }
            Some("TEXT") => {
                let text = tags::first_str(item, tags::TEXT_VALUE)
                    .filter(|text| !text.is_empty())
                    .ok_or_else(|| missing("TextValue", tags::TEXT_VALUE))?;
                DecodedNode::Name(text)
            }
            Some("NUM") => {
                let measured = tags::first_value(item, tags::MEASURED_VALUE_SEQUENCE)
                    .ok_or_else(|| {
                        missing("MeasuredValueSequence", tags::MEASURED_VALUE_SEQUENCE)
                    })?;
                // Finite values only
                let value = tags::first_decimal(measured, tags::NUMERIC_VALUE)
                    .ok_or_else(|| missing("NumericValue", tags::NUMERIC_VALUE))?;
                let unit = tags::first_value(measured, tags::MEASUREMENT_UNITS_CODE_SEQUENCE)
                    .and_then(|code| tags::first_str(code, tags::CODE_VALUE))
                    .filter(|unit| !unit.is_empty())
                    .ok_or_else(|| {
                        missing(
                            "MeasurementUnitsCodeSequence code value",
                            tags::MEASUREMENT_UNITS_CODE_SEQUENCE,
                        )
                    })?;
                DecodedNode::Value { value, unit }
            }
            _ => DecodedNode::Unknown,
        };
        Ok(node)
    }
}

#[derive(Debug, Clone)]
pub struct HierarchicalDecoder {
    max_depth: usize,
}

impl Default for HierarchicalDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl HierarchicalDecoder {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn decode(&self, items: &[Value]) -> Result<Vec<Measurement>> {
        self.decode_level(items, &[])
    }

    fn decode_level(&self, items: &[Value], path: &[String]) -> Result<Vec<Measurement>> {
        let mut decoded = Vec::new();
        let mut name: Option<&str> = None;
        let mut values = Vec::new();

        for item in items {
            match DecodedNode::classify(item)? {
                DecodedNode::Category { label, children } => {
                    if path.len() >= self.max_depth {
                        return Err(SrError::DepthExceeded { max: self.max_depth });
                    }
                    let mut child_path = path.to_vec();
                    child_path.push(label.to_string());
                    decoded.extend(self.decode_level(children, &child_path)?);
                }
                // Last one wins
                DecodedNode::Name(text) => name = Some(text),
                DecodedNode::Value { value, unit } => values.push((value, unit)),
                DecodedNode::Unknown => {}
            }
        }

        if let Some(name) = name {
            for (value, unit) in values {
                let measurement = Measurement {
                    name: name.to_string(),
                    subtypes: path.to_vec(),
                    value,
                    unit: unit.to_string(),
                };
                measurement.validate(decoded.len())?;
                decoded.push(measurement);
            }
        }
        Ok(decoded)
    }
}
