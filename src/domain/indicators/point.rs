use crate::domain::indicators::kind::{IndicatorKind, IndicatorPane};
use serde::{Deserialize, Serialize};

/// One output sample of an indicator, stamped with the candle that closes its window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub timestamp: i64,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
}

impl IndicatorPoint {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self {
            timestamp,
            value,
            upper: None,
            lower: None,
        }
    }

    pub fn with_band(timestamp: i64, value: f64, upper: f64, lower: f64) -> Self {
        Self {
            timestamp,
            value,
            upper: Some(upper),
            lower: Some(lower),
        }
    }

    /// Reads a named output line (`value`, `upper`, `lower`)
    pub fn line(&self, name: &str) -> Option<f64> {
        match name {
            "value" => Some(self.value),
            "upper" => self.upper,
            "lower" => self.lower,
            _ => None,
        }
    }
}

/// A computed indicator instance, ready for serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSeries {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: IndicatorKind,
    pub label: String,
    pub pane: IndicatorPane,
    pub points: Vec<IndicatorPoint>,
}
