//! Lookup of decoded measurements by name and exact subtype path

use std::collections::BTreeMap;

use crate::error::{Result, SrError};
use crate::quantity::Measurement;

/// Group measurements whose name is in `names`.
///
/// With `subtypes`, `subtypes[i]` is the exact path required for `names[i]`;
/// when a name is listed twice only its first position counts. Names without
/// a match are absent from the result.
pub fn find_by_name_and_optional_subtype<S: AsRef<str>>(
    measurements: &[Measurement],
    names: &[S],
    subtypes: Option<&[Vec<String>]>,
) -> Result<BTreeMap<String, Vec<Measurement>>> {
    if let Some(subtypes) = subtypes {
        if subtypes.len() != names.len() {
            return Err(SrError::Query(format!(
                "{} subtype paths given for {} names",
                subtypes.len(),
                names.len()
            )));
        }
    }

    let mut found: BTreeMap<String, Vec<Measurement>> = BTreeMap::new();
    for measurement in measurements {
        let Some(index) = names.iter().position(|n| n.as_ref() == measurement.name) else {
            continue;
        };
        if let Some(subtypes) = subtypes {
            if measurement.subtypes != subtypes[index] {
                continue;
            }
        }
        found
            .entry(measurement.name.clone())
            .or_default()
            .push(measurement.clone());
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dose(organ: &str, value: f64) -> Measurement {
        Measurement::new("dose", [organ], value, "Gy").unwrap()
    }

    #[test]
    fn test_filter_by_subtype() {
        let decoded = vec![dose("organA", 5.0), dose("organB", 7.0)];
        let subtypes = vec![vec!["organA".to_string()]];

        let found =
            find_by_name_and_optional_subtype(&decoded, &["dose"], Some(&subtypes)).unwrap();
        assert_eq!(found["dose"], vec![dose("organA", 5.0)]);
    }

    #[test]
    fn test_without_subtypes_keeps_order() {
        let mut decoded = vec![dose("organA", 5.0), dose("organB", 7.0)];
        decoded.push(Measurement::new("volume", ["organA"], 12.0, "cc").unwrap());

        let found = find_by_name_and_optional_subtype(&decoded, &["dose"], None).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found["dose"].iter().map(|m| m.value).collect::<Vec<_>>(), vec![5.0, 7.0]);
    }

    #[test]
    fn test_no_match_is_absent() {
        let decoded = vec![dose("organA", 5.0)];
        let found = find_by_name_and_optional_subtype(&decoded, &["mean"], None).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_subtype_count_mismatch() {
        let decoded = vec![dose("organA", 5.0)];
        let err = find_by_name_and_optional_subtype(&decoded, &["dose", "mean"], Some(&[vec![]]))
            .unwrap_err();
        assert!(matches!(err, SrError::Query(_)));
    }
}
