//! Document builder
//!
//! Assembles a Comprehensive SR dataset in the DICOM JSON model around the
//! content handed to it, copying patient and study identity from the dataset
//! that was analysed.

use chrono::Local;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

use super::item::SEPARATE;
use super::{tags, ContentItem};
use crate::codes::CodedConcept;
use crate::config::SrConfig;
use crate::error::{Result, SrError};

/// Attributes carried over verbatim from the analysed dataset.
const INHERITED_TAGS: &[&str] = &[
    tags::PATIENT_NAME,
    tags::PATIENT_ID,
    tags::PATIENT_BIRTH_DATE,
    tags::PATIENT_SEX,
    tags::STUDY_INSTANCE_UID,
    tags::STUDY_DATE,
    tags::STUDY_TIME,
    tags::STUDY_ID,
    tags::ACCESSION_NUMBER,
    tags::REFERRING_PHYSICIAN_NAME,
];

/// Boundary between the quantity encoder and document persistence.
pub trait DocumentBuilder {
    fn add_content_sequence(&mut self, item: ContentItem);

    fn build(&mut self) -> Result<()>;

    /// The built document. Fails with [`SrError::NotBuilt`] before `build`.
    fn document(&self) -> Result<&Value>;

    fn save_to(&self, path: &Path) -> Result<()>;
}

/// Produces `2.25.<uuid>` UIDs (PS3.5 B.2).
fn generate_uid() -> String {
    format!("2.25.{}", Uuid::new_v4().as_u128())
}

pub struct JsonSrBuilder {
    target: Value,
    purpose: CodedConcept,
    config: SrConfig,
    content: Vec<ContentItem>,
    document: Option<Value>,
}

impl JsonSrBuilder {
    pub fn new(target: Value, purpose: CodedConcept, config: SrConfig) -> Self {
        Self {
            target,
            purpose,
            config,
            content: Vec::new(),
            document: None,
        }
    }

    /// Builder whose identity attributes come from the dataset stored at `path`.
    pub fn open(path: impl AsRef<Path>, purpose: CodedConcept, config: SrConfig) -> Result<Self> {
        let target = super::read_dataset(path)?;
        Ok(Self::new(target, purpose, config))
    }

    fn header(&self) -> Map<String, Value> {
        let mut dataset = Map::new();

        for &tag in INHERITED_TAGS {
            if let Some(attribute) = self.target.get(tag) {
                dataset.insert(tag.into(), attribute.clone());
            }
        }
        if !dataset.contains_key(tags::STUDY_INSTANCE_UID) {
            dataset.insert(
                tags::STUDY_INSTANCE_UID.into(),
                tags::string("UI", generate_uid()),
            );
        }

        let now = Local::now();
        dataset.insert(
            tags::SOP_CLASS_UID.into(),
            tags::string("UI", tags::COMPREHENSIVE_SR_SOP_CLASS),
        );
        dataset.insert(tags::SOP_INSTANCE_UID.into(), tags::string("UI", generate_uid()));
        dataset.insert(tags::SERIES_INSTANCE_UID.into(), tags::string("UI", generate_uid()));
        dataset.insert(tags::MODALITY.into(), tags::string("CS", "SR"));
        dataset.insert(tags::SERIES_NUMBER.into(), tags::element("IS", vec![Value::from(1)]));
        dataset.insert(tags::INSTANCE_NUMBER.into(), tags::element("IS", vec![Value::from(1)]));
        dataset.insert(
            tags::CONTENT_DATE.into(),
            tags::string("DA", now.format("%Y%m%d").to_string()),
        );
        dataset.insert(
            tags::CONTENT_TIME.into(),
            tags::string("TM", now.format("%H%M%S").to_string()),
        );
        if let Some(institution) = &self.config.institution_name {
            dataset.insert(
                tags::INSTITUTION_NAME.into(),
                tags::string("LO", institution.as_str()),
            );
        }

        if let Some(evidence) = self.evidence() {
            dataset.insert(
                tags::CURRENT_REQUESTED_PROCEDURE_EVIDENCE_SEQUENCE.into(),
                tags::sequence(vec![evidence]),
            );
        }

        dataset.insert(tags::VALUE_TYPE.into(), tags::string("CS", "CONTAINER"));
        dataset.insert(
            tags::CONCEPT_NAME_CODE_SEQUENCE.into(),
            tags::code_sequence(&self.purpose),
        );
        dataset.insert(tags::CONTINUITY_OF_CONTENT.into(), tags::string("CS", SEPARATE));
        dataset.insert(tags::COMPLETION_FLAG.into(), tags::string("CS", "COMPLETE"));
        dataset.insert(tags::VERIFICATION_FLAG.into(), tags::string("CS", "UNVERIFIED"));

        dataset
    }

    /// Reference to the analysed instance, if it carries enough identity to point at.
    fn evidence(&self) -> Option<Value> {
        let study = tags::first_str(&self.target, tags::STUDY_INSTANCE_UID)?;
        let series = tags::first_str(&self.target, tags::SERIES_INSTANCE_UID)?;
        let class = tags::first_str(&self.target, tags::SOP_CLASS_UID)?;
        let instance = tags::first_str(&self.target, tags::SOP_INSTANCE_UID)?;

        let mut sop = Map::new();
        sop.insert(tags::REFERENCED_SOP_CLASS_UID.into(), tags::string("UI", class));
        sop.insert(tags::REFERENCED_SOP_INSTANCE_UID.into(), tags::string("UI", instance));

        let mut series_item = Map::new();
        series_item.insert(tags::SERIES_INSTANCE_UID.into(), tags::string("UI", series));
        series_item.insert(
            tags::REFERENCED_SOP_SEQUENCE.into(),
            tags::sequence(vec![Value::Object(sop)]),
        );

        let mut study_item = Map::new();
        study_item.insert(tags::STUDY_INSTANCE_UID.into(), tags::string("UI", study));
        study_item.insert(
            tags::REFERENCED_SERIES_SEQUENCE.into(),
            tags::sequence(vec![Value::Object(series_item)]),
        );
        Some(Value::Object(study_item))
    }
}

impl DocumentBuilder for JsonSrBuilder {
    fn add_content_sequence(&mut self, item: ContentItem) {
        self.content.push(item);
    }

    fn build(&mut self) -> Result<()> {
        let mut dataset = self.header();
        let content = self.content.iter().map(ContentItem::to_dicom_json).collect();
        dataset.insert(tags::CONTENT_SEQUENCE.into(), tags::sequence(content));

        debug!("Built SR with {} top-level content items", self.content.len());
        self.document = Some(Value::Object(dataset));
        Ok(())
    }

    fn document(&self) -> Result<&Value> {
        self.document.as_ref().ok_or(SrError::NotBuilt)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        let document = self.document()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(document)?)?;
        info!("Saved SR to {:?}", path);
        Ok(())
    }
}
