//! DICOM JSON model helpers
//!
//! Attributes are keyed by 8-digit hexadecimal tags and hold an object with a
//! `vr` and an optional `Value` array; sequence items are nested datasets.

use serde_json::{json, Map, Value};

use crate::codes::CodedConcept;
use crate::error::{Result, SrError};

pub const SOP_CLASS_UID: &str = "00080016";
pub const SOP_INSTANCE_UID: &str = "00080018";
pub const STUDY_DATE: &str = "00080020";
pub const CONTENT_DATE: &str = "00080023";
pub const STUDY_TIME: &str = "00080030";
pub const CONTENT_TIME: &str = "00080033";
pub const ACCESSION_NUMBER: &str = "00080050";
pub const MODALITY: &str = "00080060";
pub const INSTITUTION_NAME: &str = "00080080";
pub const REFERRING_PHYSICIAN_NAME: &str = "00080090";
pub const CODE_VALUE: &str = "00080100";
pub const CODING_SCHEME_DESIGNATOR: &str = "00080102";
pub const CODE_MEANING: &str = "00080104";
pub const REFERENCED_SERIES_SEQUENCE: &str = "00081115";
pub const REFERENCED_SOP_CLASS_UID: &str = "00081150";
pub const REFERENCED_SOP_INSTANCE_UID: &str = "00081155";
pub const REFERENCED_SOP_SEQUENCE: &str = "00081199";
pub const MEASUREMENT_UNITS_CODE_SEQUENCE: &str = "004008EA";
pub const PATIENT_NAME: &str = "00100010";
pub const PATIENT_ID: &str = "00100020";
pub const PATIENT_BIRTH_DATE: &str = "00100030";
pub const PATIENT_SEX: &str = "00100040";
pub const STUDY_INSTANCE_UID: &str = "0020000D";
pub const SERIES_INSTANCE_UID: &str = "0020000E";
pub const STUDY_ID: &str = "00200010";
pub const SERIES_NUMBER: &str = "00200011";
pub const INSTANCE_NUMBER: &str = "00200013";
pub const RELATIONSHIP_TYPE: &str = "0040A010";
pub const VALUE_TYPE: &str = "0040A040";
pub const CONCEPT_NAME_CODE_SEQUENCE: &str = "0040A043";
pub const CONTINUITY_OF_CONTENT: &str = "0040A050";
pub const TEXT_VALUE: &str = "0040A160";
pub const CONCEPT_CODE_SEQUENCE: &str = "0040A168";
pub const MEASURED_VALUE_SEQUENCE: &str = "0040A300";
pub const NUMERIC_VALUE: &str = "0040A30A";
pub const CURRENT_REQUESTED_PROCEDURE_EVIDENCE_SEQUENCE: &str = "0040A375";
pub const COMPLETION_FLAG: &str = "0040A491";
pub const VERIFICATION_FLAG: &str = "0040A493";
pub const CONTENT_SEQUENCE: &str = "0040A730";

/// Comprehensive SR Storage
pub const COMPREHENSIVE_SR_SOP_CLASS: &str = "1.2.840.10008.5.1.4.1.1.88.33";

pub fn element(vr: &str, values: Vec<Value>) -> Value {
    json!({ "vr": vr, "Value": values })
}

pub fn string(vr: &str, value: impl Into<String>) -> Value {
    element(vr, vec![Value::String(value.into())])
}

pub fn sequence(items: Vec<Value>) -> Value {
    if items.is_empty() {
        json!({ "vr": "SQ" })
    } else {
        element("SQ", items)
    }
}

pub fn code_item(concept: &CodedConcept) -> Value {
    let mut item = Map::new();
    item.insert(CODE_VALUE.into(), string("SH", concept.value.as_str()));
    item.insert(CODING_SCHEME_DESIGNATOR.into(), string("SH", concept.scheme.as_str()));
    item.insert(CODE_MEANING.into(), string("LO", concept.meaning.as_str()));
    Value::Object(item)
}

pub fn code_sequence(concept: &CodedConcept) -> Value {
    sequence(vec![code_item(concept)])
}

/// First entry of an attribute's `Value` array.
pub fn first_value<'a>(item: &'a Value, tag: &str) -> Option<&'a Value> {
    item.get(tag)?.get("Value")?.get(0)
}

pub fn first_str<'a>(item: &'a Value, tag: &str) -> Option<&'a str> {
    first_value(item, tag)?.as_str()
}

/// Items of a sequence attribute.
///
/// `None` when the attribute is absent; a present but empty sequence yields an
/// empty slice. A `Value` that is not an array is a decode error.
pub fn sequence_items<'a>(item: &'a Value, tag: &'static str) -> Result<Option<&'a [Value]>> {
    let Some(attribute) = item.get(tag) else {
        return Ok(None);
    };
    match attribute.get("Value") {
        Some(Value::Array(items)) => Ok(Some(items.as_slice())),
        Some(_) => Err(SrError::Decode { field: "sequence items", tag }),
        None => Ok(Some(&[])),
    }
}

/// Decimal strings may be stored as JSON numbers or as numeric text.
/// Non-finite results (`NaN`, `inf`, overflowing exponents) are rejected.
pub fn first_decimal(item: &Value, tag: &str) -> Option<f64> {
    let value = match first_value(item, tag)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_item_layout() {
        let item = code_item(&CodedConcept::new("2", "CUSTOM", "Quantity Value"));
        assert_eq!(first_str(&item, CODE_VALUE), Some("2"));
        assert_eq!(first_str(&item, CODING_SCHEME_DESIGNATOR), Some("CUSTOM"));
        assert_eq!(item[CODE_MEANING]["vr"], "LO");
    }

    #[test]
    fn test_decimal_forms() {
        let item = json!({
            "A": { "vr": "DS", "Value": [1.5] },
            "B": { "vr": "DS", "Value": [" 2.25 "] },
            "C": { "vr": "DS", "Value": ["n/a"] },
            "E": { "vr": "DS", "Value": ["NaN"] },
            "F": { "vr": "DS", "Value": ["inf"] },
            "G": { "vr": "DS", "Value": ["1e999"] }
        });
        assert_eq!(first_decimal(&item, "A"), Some(1.5));
        assert_eq!(first_decimal(&item, "B"), Some(2.25));
        assert_eq!(first_decimal(&item, "C"), None);
        assert_eq!(first_decimal(&item, "D"), None);
        assert_eq!(first_decimal(&item, "E"), None);
        assert_eq!(first_decimal(&item, "F"), None);
        assert_eq!(first_decimal(&item, "G"), None);
    }

    #[test]
    fn test_empty_sequence() {
        let item = json!({ (CONTENT_SEQUENCE): sequence(vec![]) });
        let items = sequence_items(&item, CONTENT_SEQUENCE).unwrap();
        assert_eq!(items.map(<[Value]>::len), Some(0));
        assert!(sequence_items(&item, TEXT_VALUE).unwrap().is_none());
    }

    #[test]
    fn test_malformed_sequence() {
        let item = json!({ (CONTENT_SEQUENCE): { "vr": "SQ", "Value": "not a list" } });
        let err = sequence_items(&item, CONTENT_SEQUENCE).unwrap_err();
        assert!(matches!(err, SrError::Decode { tag: CONTENT_SEQUENCE, .. }));
    }
}
