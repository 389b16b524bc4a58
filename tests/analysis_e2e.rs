//! End-to-end: build a report from measurements, save it, read it back

use analysis_sr::document::tags;
use analysis_sr::{AnalysisSrBuilder, SrConfig, SrError};
use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_target(dir: &TempDir) -> Result<PathBuf> {
    let target = dir.path().join("rtdose.json");
    let dataset = json!({
        "00100020": { "vr": "LO", "Value": ["P-042"] },
        "00100010": { "vr": "PN", "Value": [{ "Alphabetic": "Roe^Sam" }] },
        "0020000D": { "vr": "UI", "Value": ["1.2.826.0.1.1"] },
        "0020000E": { "vr": "UI", "Value": ["1.2.826.0.1.1.2"] },
        "00080016": { "vr": "UI", "Value": ["1.2.840.10008.5.1.4.1.1.481.2"] },
        "00080018": { "vr": "UI", "Value": ["1.2.826.0.1.1.2.3"] }
    });
    std::fs::write(&target, serde_json::to_string(&dataset)?)?;
    Ok(target)
}

fn measurements() -> Vec<serde_json::Value> {
    vec![
        json!(["Mean dose", [], 12.4, "Gy"]),
        json!(["dose", ["organA"], 5.0, "Gy"]),
        json!(["dose", ["organB"], 7.0, "Gy"]),
        json!(["EQD2", ["organA", "Max"], 9.5, "Gy"]),
        json!({ "name": "TCP", "subtypes": ["PTV"], "value": 0.93, "unit": "ratio" }),
    ]
}

#[test]
fn test_build_save_extract() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let target = write_target(&dir)?;
    let out = dir.path().join("reports").join("analysis_sr.json");

    let mut builder = AnalysisSrBuilder::new(&target, "Radiobiology evaluation");
    assert_eq!(builder.add_values(&measurements())?, 5);
    builder.build()?;
    builder.save_sr_to(&out)?;

    let doc = builder.get_sr()?;
    assert_eq!(tags::first_str(doc, tags::PATIENT_ID), Some("P-042"));

    let mut extracted = builder.extract_all_values_from_existing_sr(&out)?;
    extracted.sort_by(|a, b| a.value.total_cmp(&b.value));
    let summary: Vec<(&str, Vec<String>, f64)> = extracted
        .iter()
        .map(|m| (m.name.as_str(), m.subtypes.clone(), m.value))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("TCP", vec!["PTV".to_string()], 0.93),
            ("dose", vec!["organA".to_string()], 5.0),
            ("dose", vec!["organB".to_string()], 7.0),
            ("EQD2", vec!["organA".to_string(), "Max".to_string()], 9.5),
            ("Mean dose", vec![], 12.4),
        ]
    );
    Ok(())
}

#[test]
fn test_query_saved_report() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let target = write_target(&dir)?;
    let out = dir.path().join("sr.json");

    let mut builder = AnalysisSrBuilder::new(&target, "QA");
    builder.add_values(&measurements())?;
    builder.build()?;
    builder.save_sr_to(&out)?;

    let organ_a = vec![vec!["organA".to_string()]];
    let found =
        builder.get_values_from_value_name_in_existing_sr(&out, &["dose"], Some(&organ_a))?;
    assert_eq!(found.len(), 1);
    assert_eq!(found["dose"].len(), 1);
    assert_eq!(found["dose"][0].value, 5.0);

    let all_doses =
        builder.get_values_from_value_name_in_existing_sr(&out, &["dose", "TCP"], None)?;
    assert_eq!(all_doses["dose"].len(), 2);
    assert_eq!(all_doses["TCP"][0].unit, "ratio");
    Ok(())
}

#[test]
fn test_build_without_target_identity() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let target = dir.path().join("empty.json");
    std::fs::write(&target, "{}")?;

    let config = SrConfig {
        institution_name: Some("CHU de Quebec".to_string()),
        ..SrConfig::default()
    };
    let mut builder = AnalysisSrBuilder::with_config(&target, "QA", config);
    builder.build()?;

    let doc = builder.get_sr()?;
    assert_eq!(tags::first_str(doc, tags::INSTITUTION_NAME), Some("CHU de Quebec"));
    assert!(doc.get(tags::PATIENT_ID).is_none());
    Ok(())
}

#[test]
fn test_depth_ceiling_from_config() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let target = write_target(&dir)?;

    let config = SrConfig::default().with_max_depth(1);
    let mut builder = AnalysisSrBuilder::with_config(&target, "QA", config);
    builder.add_values(&[json!(["EQD2", ["organA", "Max"], 9.5, "Gy"])])?;

    let err = builder.build().unwrap_err();
    assert!(matches!(err, SrError::DepthExceeded { max: 1 }));
    assert!(matches!(builder.get_sr(), Err(SrError::NotBuilt)));
    Ok(())
}
