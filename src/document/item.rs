//! SR Content Items
//!
//! Typed content items and their DICOM JSON rendering, plus the mapping from
//! encoder nodes onto the fixed code vocabulary.

use serde_json::{Map, Value};

use super::tags;
use crate::codes::{self, CodedConcept};
use crate::encoder::ContentNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipType {
    Contains,
    HasProperties,
}

impl RelationshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::Contains => "CONTAINS",
            RelationshipType::HasProperties => "HAS PROPERTIES",
        }
    }
}

/// Every container this crate writes lists its children as separate items.
pub(crate) const SEPARATE: &str = "SEPARATE";

#[derive(Debug, Clone, PartialEq)]
pub enum ContentValue {
    Container,
    Code(CodedConcept),
    Text(String),
    Num { value: f64, unit: CodedConcept },
}

impl ContentValue {
    pub fn value_type(&self) -> &'static str {
        match self {
            ContentValue::Container => "CONTAINER",
            ContentValue::Code(_) => "CODE",
            ContentValue::Text(_) => "TEXT",
            ContentValue::Num { .. } => "NUM",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub relationship: RelationshipType,
    pub concept_name: CodedConcept,
    pub value: ContentValue,
    pub children: Vec<ContentItem>,
}

impl ContentItem {
    /// The container that holds every encoded quantity.
    pub fn root_container(scheme: &str, meaning: &str, children: Vec<ContentItem>) -> Self {
        Self {
            relationship: RelationshipType::Contains,
            concept_name: CodedConcept::new(codes::ROOT_CONTAINER.value, scheme, meaning),
            value: ContentValue::Container,
            children,
        }
    }

    /// Map an encoder node (and its subtree) onto content items.
    pub fn from_node(node: &ContentNode, scheme: &str) -> Self {
        match node {
            ContentNode::Category { level, label, children } => {
                let (concept_name, label_value) = if *level == 0 {
                    (codes::TYPE_OF_QUANTITY, codes::TYPE_LABEL_VALUE)
                } else {
                    (codes::SUBTYPE_OF_QUANTITY, codes::SUBTYPE_LABEL_VALUE)
                };
                Self {
                    relationship: RelationshipType::HasProperties,
                    concept_name: concept_name.concept(scheme),
                    value: ContentValue::Code(CodedConcept::new(
                        label_value,
                        scheme,
                        label.as_str(),
                    )),
                    children: children.iter().map(|c| Self::from_node(c, scheme)).collect(),
                }
            }
            ContentNode::Name { text } => Self {
                relationship: RelationshipType::HasProperties,
                concept_name: codes::VALUE_NAME.concept(scheme),
                value: ContentValue::Text(text.clone()),
                children: Vec::new(),
            },
            ContentNode::Value { value, unit } => Self {
                relationship: RelationshipType::HasProperties,
                concept_name: codes::QUANTITY_VALUE.concept(scheme),
                value: ContentValue::Num {
                    value: *value,
                    unit: codes::unit(scheme, unit),
                },
                children: Vec::new(),
            },
        }
    }

    pub fn to_dicom_json(&self) -> Value {
        let mut item = Map::new();
        item.insert(
            tags::RELATIONSHIP_TYPE.into(),
            tags::string("CS", self.relationship.as_str()),
        );
        item.insert(tags::VALUE_TYPE.into(), tags::string("CS", self.value.value_type()));
        item.insert(
            tags::CONCEPT_NAME_CODE_SEQUENCE.into(),
            tags::code_sequence(&self.concept_name),
        );

        match &self.value {
            ContentValue::Container => {
                item.insert(tags::CONTINUITY_OF_CONTENT.into(), tags::string("CS", SEPARATE));
            }
            ContentValue::Code(concept) => {
                item.insert(tags::CONCEPT_CODE_SEQUENCE.into(), tags::code_sequence(concept));
            }
            ContentValue::Text(text) => {
                item.insert(tags::TEXT_VALUE.into(), tags::string("UT", text.as_str()));
            }
            ContentValue::Num { value, unit } => {
                let mut measured = Map::new();
                measured.insert(
                    tags::NUMERIC_VALUE.into(),
                    tags::element("DS", vec![Value::from(*value)]),
                );
                measured.insert(
                    tags::MEASUREMENT_UNITS_CODE_SEQUENCE.into(),
                    tags::code_sequence(unit),
                );
                item.insert(
                    tags::MEASURED_VALUE_SEQUENCE.into(),
                    tags::sequence(vec![Value::Object(measured)]),
                );
            }
        }

        if !self.children.is_empty() || matches!(self.value, ContentValue::Container) {
            let children = self.children.iter().map(ContentItem::to_dicom_json).collect();
            item.insert(tags::CONTENT_SEQUENCE.into(), tags::sequence(children));
        }

        Value::Object(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_codes_by_level() {
        let nested = ContentNode::Category {
            level: 1,
            label: "Core".into(),
            children: vec![],
        };
        let top = ContentNode::Category {
            level: 0,
            label: "PTV".into(),
            children: vec![nested],
        };

        let item = ContentItem::from_node(&top, "CUSTOM");
        assert_eq!(item.concept_name.meaning, "Type of Quantity");
        assert_eq!(item.value, ContentValue::Code(CodedConcept::new("5", "CUSTOM", "PTV")));
        assert_eq!(item.children[0].concept_name.meaning, "Subtype of Quantity");
        assert_eq!(
            item.children[0].value,
            ContentValue::Code(CodedConcept::new("6", "CUSTOM", "Core"))
        );
    }

    #[test]
    fn test_num_item_json() {
        let node = ContentNode::Value { value: 2.5, unit: "Gy".into() };
        let json = ContentItem::from_node(&node, "CUSTOM").to_dicom_json();

        assert_eq!(tags::first_str(&json, tags::VALUE_TYPE), Some("NUM"));
        assert_eq!(tags::first_str(&json, tags::RELATIONSHIP_TYPE), Some("HAS PROPERTIES"));
        let measured = tags::first_value(&json, tags::MEASURED_VALUE_SEQUENCE).unwrap();
        assert_eq!(tags::first_decimal(measured, tags::NUMERIC_VALUE), Some(2.5));
        let unit = tags::first_value(measured, tags::MEASUREMENT_UNITS_CODE_SEQUENCE).unwrap();
        assert_eq!(tags::first_str(unit, tags::CODE_VALUE), Some("Gy"));
        assert_eq!(tags::first_str(unit, tags::CODE_MEANING), Some("Units"));
        assert!(json.get(tags::CONTENT_SEQUENCE).is_none());
    }

    #[test]
    fn test_root_container_json() {
        let root = ContentItem::root_container("CUSTOM", "Radiobiology Quantities", vec![]);
        let json = root.to_dicom_json();
        assert_eq!(tags::first_str(&json, tags::VALUE_TYPE), Some("CONTAINER"));
        assert_eq!(tags::first_str(&json, tags::CONTINUITY_OF_CONTENT), Some("SEPARATE"));
        let children = tags::sequence_items(&json, tags::CONTENT_SEQUENCE).unwrap();
        assert_eq!(children.map(<[Value]>::len), Some(0));
    }
}
