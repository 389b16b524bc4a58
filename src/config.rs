//! Builder Configuration
//!
//! Defaults mirror the fixed vocabulary used by existing documents. Each field
//! can be overridden through an `ANALYSIS_SR_*` environment variable.

use std::env;
use tracing::warn;

/// Default ceiling on subtype nesting, applied to both encoding and decoding.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct SrConfig {
    /// Coding scheme designator attached to every code in the report
    pub coding_scheme: String,
    /// Meaning of the root container concept
    pub root_meaning: String,
    /// Maximum subtype path length accepted by the encoder and decoder
    pub max_depth: usize,
    /// Written to InstitutionName when set
    pub institution_name: Option<String>,
}

impl Default for SrConfig {
    fn default() -> Self {
        Self {
            coding_scheme: "CUSTOM".to_string(),
            root_meaning: "Radiobiology Quantities".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            institution_name: None,
        }
    }
}

impl SrConfig {
    /// Build a config from the process environment, falling back to defaults.
    ///
    /// Callers that rely on a `.env` file should run `dotenv::dotenv()` first.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(scheme) = lookup("ANALYSIS_SR_CODING_SCHEME") {
            config.coding_scheme = scheme;
        }
        if let Some(meaning) = lookup("ANALYSIS_SR_ROOT_MEANING") {
            config.root_meaning = meaning;
        }
        if let Some(raw) = lookup("ANALYSIS_SR_MAX_DEPTH") {
            match raw.parse::<usize>() {
                Ok(depth) if depth > 0 => config.max_depth = depth,
                _ => warn!("Ignoring invalid ANALYSIS_SR_MAX_DEPTH={:?}", raw),
            }
        }
        config.institution_name = lookup("ANALYSIS_SR_INSTITUTION");

        config
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = SrConfig::default();
        assert_eq!(config.coding_scheme, "CUSTOM");
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.institution_name.is_none());
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            ("ANALYSIS_SR_CODING_SCHEME", "99LOCAL"),
            ("ANALYSIS_SR_MAX_DEPTH", "8"),
            ("ANALYSIS_SR_INSTITUTION", "CHU"),
        ]
        .into_iter()
        .collect();

        let config = SrConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.coding_scheme, "99LOCAL");
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.institution_name.as_deref(), Some("CHU"));
        assert_eq!(config.root_meaning, "Radiobiology Quantities");
    }

    #[test]
    fn test_invalid_depth_is_ignored() {
        let config = SrConfig::from_lookup(|k| {
            (k == "ANALYSIS_SR_MAX_DEPTH").then(|| "zero".to_string())
        });
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }
}
