//! Analysis SR Builder
//!
//! Caller-facing entry point: collect measurements, build a structured report
//! around an analysed dataset, save it, and read quantities back out of
//! existing reports.

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::codes;
use crate::config::SrConfig;
use crate::decoder::HierarchicalDecoder;
use crate::document::{self, ContentItem, DocumentBuilder, JsonSrBuilder};
use crate::encoder::HierarchicalEncoder;
use crate::error::{Result, SrError};
use crate::quantity::{Measurement, QuantityRegistry};
use crate::query;

pub struct AnalysisSrBuilder {
    target: PathBuf,
    purpose: String,
    config: SrConfig,
    registry: QuantityRegistry,
    sr: Option<JsonSrBuilder>,
}

impl AnalysisSrBuilder {
    /// `target` is the analysed dataset whose identity the report inherits.
    pub fn new(target: impl Into<PathBuf>, purpose: impl Into<String>) -> Self {
        Self::with_config(target, purpose, SrConfig::default())
    }

    pub fn with_config(
        target: impl Into<PathBuf>,
        purpose: impl Into<String>,
        config: SrConfig,
    ) -> Self {
        Self {
            target: target.into(),
            purpose: purpose.into(),
            config,
            registry: QuantityRegistry::new(),
            sr: None,
        }
    }

    pub fn config(&self) -> &SrConfig {
        &self.config
    }

    /// Add loosely typed `[name, [subtypes..], value, unit]` items.
    pub fn add_values(&mut self, values: &[Value]) -> Result<usize> {
        Ok(self.registry.add_measurements(values)?)
    }

    pub fn add_measurements(
        &mut self,
        measurements: impl IntoIterator<Item = Measurement>,
    ) -> Result<usize> {
        Ok(self.registry.extend(measurements)?)
    }

    pub fn measurements(&self) -> &[Measurement] {
        self.registry.all_measurements()
    }

    /// Encode every registered measurement and build the report.
    ///
    /// Nothing is kept from a failed build; a previously built report stays
    /// available.
    pub fn build(&mut self) -> Result<()> {
        let scheme = self.config.coding_scheme.as_str();
        let encoder = HierarchicalEncoder::new(self.config.max_depth);
        let tree = encoder.encode(self.registry.all_measurements())?;
        debug!("Encoded {} measurements into {} top-level nodes", self.registry.len(), tree.len());

        let children = tree.iter().map(|node| ContentItem::from_node(node, scheme)).collect();
        let root = ContentItem::root_container(scheme, &self.config.root_meaning, children);

        let purpose = codes::purpose(scheme, &self.purpose);
        let mut sr = JsonSrBuilder::open(&self.target, purpose, self.config.clone())?;
        sr.add_content_sequence(root);
        sr.build()?;

        info!("Built SR for {:?} with {} measurements", self.target, self.registry.len());
        self.sr = Some(sr);
        Ok(())
    }

    pub fn get_sr(&self) -> Result<&Value> {
        self.sr.as_ref().ok_or(SrError::NotBuilt)?.document()
    }

    pub fn save_sr_to(&self, path: impl AsRef<Path>) -> Result<()> {
        self.sr.as_ref().ok_or(SrError::NotBuilt)?.save_to(path.as_ref())
    }

    pub fn extract_all_values_from_existing_sr(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<Measurement>> {
        extract_all_values(path, &self.config)
    }

    pub fn get_values_from_value_name_in_existing_sr<S: AsRef<str>>(
        &self,
        path: impl AsRef<Path>,
        names: &[S],
        subtypes: Option<&[Vec<String>]>,
    ) -> Result<BTreeMap<String, Vec<Measurement>>> {
        let all = self.extract_all_values_from_existing_sr(path)?;
        query::find_by_name_and_optional_subtype(&all, names, subtypes)
    }
}

/// Read a saved report and flatten every quantity it holds.
pub fn extract_all_values(path: impl AsRef<Path>, config: &SrConfig) -> Result<Vec<Measurement>> {
    let dataset = document::read_dataset(path.as_ref())?;
    let items = document::quantity_items(&dataset)?;
    let measurements = HierarchicalDecoder::new(config.max_depth).decode(&items)?;
    debug!("Extracted {} measurements from {:?}", measurements.len(), path.as_ref());
    Ok(measurements)
}
