//! Measurement type and shape validation

use serde::Serialize;
use serde_json::Value;

use crate::error::ShapeError;

/// One named numeric fact, located by its subtype path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub name: String,
    /// Category labels, most general first
    pub subtypes: Vec<String>,
    pub value: f64,
    pub unit: String,
}

impl Measurement {
    /// Create a measurement, enforcing the non-empty name/unit and finite value rules.
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        subtypes: impl IntoIterator<Item = S>,
        value: f64,
        unit: impl Into<String>,
    ) -> Result<Self, ShapeError> {
        let measurement = Self {
            name: name.into(),
            subtypes: subtypes.into_iter().map(Into::into).collect(),
            value,
            unit: unit.into(),
        };
        measurement.validate(0)?;
        Ok(measurement)
    }

    pub fn depth(&self) -> usize {
        self.subtypes.len()
    }

    pub(crate) fn validate(&self, index: usize) -> Result<(), ShapeError> {
        if self.name.is_empty() {
            return Err(ShapeError::EmptyName { index });
        }
        if !self.value.is_finite() {
            return Err(ShapeError::NonFinite { index });
        }
        if self.unit.is_empty() {
            return Err(ShapeError::EmptyUnit { index });
        }
        Ok(())
    }

    /// Parse a loosely typed item, as found in JSON or YAML measurement files.
    ///
    /// Accepts either a 4-element list `[name, [subtypes..], value, unit]` or an
    /// object with exactly the keys `name`, `subtypes`, `value` and `unit`.
    /// `index` is the item's position in its batch and is carried by any error.
    pub fn from_value(item: &Value, index: usize) -> Result<Self, ShapeError> {
        let (name, subtypes, value, unit) = match item {
            Value::Array(fields) => {
                if fields.len() != 4 {
                    return Err(ShapeError::Arity { index, found: fields.len() });
                }
                (&fields[0], &fields[1], &fields[2], &fields[3])
            }
            Value::Object(map) => {
                let get = |key: &str| map.get(key);
                match (get("name"), get("subtypes"), get("value"), get("unit")) {
                    (Some(n), Some(s), Some(v), Some(u)) if map.len() == 4 => (n, s, v, u),
                    _ => return Err(ShapeError::Arity { index, found: map.len() }),
                }
            }
            _ => return Err(ShapeError::NotAStructure { index }),
        };

        let name = name.as_str().ok_or(ShapeError::Name { index })?;
        let subtypes = subtypes
            .as_array()
            .ok_or(ShapeError::Subtypes { index })?
            .iter()
            .enumerate()
            .map(|(position, label)| {
                label
                    .as_str()
                    .map(str::to_string)
                    .ok_or(ShapeError::SubtypeLabel { index, position })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let value = value.as_f64().ok_or(ShapeError::Value { index })?;
        let unit = unit.as_str().ok_or(ShapeError::Unit { index })?;

        let measurement = Self {
            name: name.to_string(),
            subtypes,
            value,
            unit: unit.to_string(),
        };
        measurement.validate(index)?;
        Ok(measurement)
    }
}
