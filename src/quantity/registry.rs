//! Quantity Registry
//!
//! Append-only holding area for the measurements of one build cycle.

use serde_json::Value;
use tracing::debug;

use super::Measurement;
use crate::error::ShapeError;

#[derive(Debug, Default, Clone)]
pub struct QuantityRegistry {
    measurements: Vec<Measurement>,
}

impl QuantityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a batch of loosely typed items.
    ///
    /// The batch is all-or-nothing: the first malformed item aborts the call
    /// and none of the batch is kept.
    pub fn add_measurements(&mut self, items: &[Value]) -> Result<usize, ShapeError> {
        let batch = items
            .iter()
            .enumerate()
            .map(|(index, item)| Measurement::from_value(item, index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.push_batch(batch))
    }

    /// Append measurements that are already typed.
    pub fn extend(
        &mut self,
        measurements: impl IntoIterator<Item = Measurement>,
    ) -> Result<usize, ShapeError> {
        let batch: Vec<Measurement> = measurements.into_iter().collect();
        for (index, measurement) in batch.iter().enumerate() {
            measurement.validate(index)?;
        }
        Ok(self.push_batch(batch))
    }

    fn push_batch(&mut self, batch: Vec<Measurement>) -> usize {
        let added = batch.len();
        self.measurements.extend(batch);
        debug!("Registry accepted {} measurements ({} total)", added, self.measurements.len());
        added
    }

    /// All accepted measurements, in insertion order.
    pub fn all_measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}
