//! Fixed code vocabulary
//!
//! Code values are part of the on-disk contract: documents written with
//! these values must stay readable, so they never change.

/// A (code value, coding scheme, code meaning) triplet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodedConcept {
    pub value: String,
    pub scheme: String,
    pub meaning: String,
}

impl CodedConcept {
    pub fn new(
        value: impl Into<String>,
        scheme: impl Into<String>,
        meaning: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            scheme: scheme.into(),
            meaning: meaning.into(),
        }
    }
}

/// A code whose value and meaning are fixed; the scheme comes from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCode {
    pub value: &'static str,
    pub meaning: &'static str,
}

impl FixedCode {
    pub fn concept(&self, scheme: &str) -> CodedConcept {
        CodedConcept::new(self.value, scheme, self.meaning)
    }
}

pub const VALUE_NAME: FixedCode = FixedCode { value: "1", meaning: "Value Name" };
pub const QUANTITY_VALUE: FixedCode = FixedCode { value: "2", meaning: "Quantity Value" };
pub const TYPE_OF_QUANTITY: FixedCode = FixedCode { value: "4", meaning: "Type of Quantity" };
pub const SUBTYPE_OF_QUANTITY: FixedCode = FixedCode {
    value: "4",
    meaning: "Subtype of Quantity",
};
pub const ROOT_CONTAINER: FixedCode = FixedCode {
    value: "100",
    meaning: "Radiobiology Quantities",
};

/// Code value of a top-level category label; the meaning is the label itself.
pub const TYPE_LABEL_VALUE: &str = "5";
/// Code value of a nested subcategory label.
pub const SUBTYPE_LABEL_VALUE: &str = "6";
/// Code value of the document title; the meaning is the caller's purpose text.
pub const PURPOSE_VALUE: &str = "5000";
/// Meaning attached to every unit code. The unit text itself is the code value.
pub const UNITS_MEANING: &str = "Units";

pub fn purpose(scheme: &str, meaning: &str) -> CodedConcept {
    CodedConcept::new(PURPOSE_VALUE, scheme, meaning)
}

pub fn unit(scheme: &str, unit: &str) -> CodedConcept {
    CodedConcept::new(unit, scheme, UNITS_MEANING)
}
