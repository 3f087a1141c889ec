//! Indicator preset files.
//!
//! A preset file lists the indicators a chart should show:
//!
//! ```toml
//! [[indicator]]
//! id = "trend"
//! type = "ema"
//!
//! [indicator.params]
//! length = 50
//! source = "close"
//! ```
//!
//! Omitted params fall back to the kind's registry defaults.

use crate::domain::indicators::{IndicatorInstance, IndicatorKind, ParamOverrides};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresetFile {
    #[serde(default, rename = "indicator")]
    pub indicators: Vec<PresetEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresetEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: IndicatorKind,
    #[serde(default)]
    pub params: ParamOverrides,
}

impl PresetEntry {
    pub fn into_instance(self) -> IndicatorInstance {
        let params = self.kind.default_params().apply(&self.params);
        IndicatorInstance::new(self.id, self.kind, params)
    }
}

impl PresetFile {
    pub fn into_instances(self) -> Vec<IndicatorInstance> {
        let mut seen = HashSet::new();
        for entry in &self.indicators {
            if !seen.insert(entry.id.as_str()) {
                warn!("Presets: duplicate indicator id '{}'", entry.id);
            }
        }
        self.indicators
            .into_iter()
            .map(PresetEntry::into_instance)
            .collect()
    }
}

/// Parses preset TOML into indicator instances, in file order
pub fn parse_presets(content: &str) -> Result<Vec<IndicatorInstance>> {
    let file: PresetFile = toml::from_str(content).context("Failed to parse indicator presets TOML")?;
    Ok(file.into_instances())
}

pub fn load_presets(path: &Path) -> Result<Vec<IndicatorInstance>> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read indicator presets file: {}", path.display()))?;
    let instances =
        parse_presets(&content).context(format!("Invalid presets in {}", path.display()))?;
    info!("Loaded {} indicator presets from {}", instances.len(), path.display());
    Ok(instances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicators::PriceSource;

    #[test]
    fn test_params_override_registry_defaults() {
        let instances = parse_presets(
            r#"
            [[indicator]]
            id = "bands"
            type = "bollinger"

            [indicator.params]
            length = 10
            stdDev = 2.5

            [[indicator]]
            id = "momentum"
            type = "rsi"
            "#,
        )
        .unwrap();

        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].id, "bands");
        assert_eq!(instances[0].params.window(), 10);
        assert_eq!(instances[0].params.std_dev, Some(2.5));
        assert_eq!(instances[0].params.source, PriceSource::Close);

        assert_eq!(instances[1].kind, IndicatorKind::Rsi);
        assert_eq!(instances[1].params, IndicatorKind::Rsi.default_params());
    }

    #[test]
    fn test_macd_and_anchor_keys() {
        let instances = parse_presets(
            r#"
            [[indicator]]
            id = "hist"
            type = "macdHistogram"
            params = { macdFast = 5, macdSlow = 35, macdSignal = 5 }

            [[indicator]]
            id = "open-vwap"
            type = "vwap"
            params = { anchorIso = "2024-01-02T14:30:00Z" }
            "#,
        )
        .unwrap();

        let lengths = instances[0].params.macd_lengths();
        assert_eq!((lengths.fast, lengths.slow, lengths.signal), (5, 35, 5));
        assert_eq!(instances[1].params.anchor(), Some("2024-01-02T14:30:00Z"));
    }

    #[test]
    fn test_empty_file_has_no_instances() {
        assert!(parse_presets("").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_unknown_type_and_keys() {
        assert!(parse_presets("[[indicator]]\nid = \"x\"\ntype = \"kama\"\n").is_err());
        assert!(
            parse_presets("[[indicator]]\nid = \"x\"\ntype = \"sma\"\nparams = { period = 5 }\n")
                .is_err()
        );
        assert!(parse_presets("[[indicator]]\ntype = \"sma\"\n").is_err());
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = load_presets(Path::new("/nonexistent/presets.toml")).unwrap_err();
        assert!(err.to_string().contains("presets"));
    }
}
