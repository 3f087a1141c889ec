use crate::domain::errors::ParseError;
use crate::domain::indicators::params::IndicatorParams;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a chart draws an indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorPane {
    /// On top of the price series
    Overlay,
    /// In its own sub-chart
    Separate,
}

impl IndicatorPane {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorPane::Overlay => "overlay",
            IndicatorPane::Separate => "separate",
        }
    }
}

/// Every indicator the engine knows how to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IndicatorKind {
    #[serde(rename = "sma")]
    Sma,
    #[serde(rename = "ema")]
    Ema,
    #[serde(rename = "rsi")]
    Rsi,
    #[serde(rename = "vwap")]
    Vwap,
    #[serde(rename = "macd")]
    Macd,
    #[serde(rename = "macdSignal")]
    MacdSignal,
    #[serde(rename = "macdHistogram")]
    MacdHistogram,
    #[serde(rename = "bollinger")]
    Bollinger,
    #[serde(rename = "volume")]
    Volume,
    #[serde(rename = "volumeMA")]
    VolumeMa,
    #[serde(rename = "atr")]
    Atr,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 11] = [
        IndicatorKind::Sma,
        IndicatorKind::Ema,
        IndicatorKind::Rsi,
        IndicatorKind::Vwap,
        IndicatorKind::Macd,
        IndicatorKind::MacdSignal,
        IndicatorKind::MacdHistogram,
        IndicatorKind::Bollinger,
        IndicatorKind::Volume,
        IndicatorKind::VolumeMa,
        IndicatorKind::Atr,
    ];

    /// Type tag used on the wire and in preset files
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorKind::Sma => "sma",
            IndicatorKind::Ema => "ema",
            IndicatorKind::Rsi => "rsi",
            IndicatorKind::Vwap => "vwap",
            IndicatorKind::Macd => "macd",
            IndicatorKind::MacdSignal => "macdSignal",
            IndicatorKind::MacdHistogram => "macdHistogram",
            IndicatorKind::Bollinger => "bollinger",
            IndicatorKind::Volume => "volume",
            IndicatorKind::VolumeMa => "volumeMA",
            IndicatorKind::Atr => "atr",
        }
    }
}

impl FromStr for IndicatorKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        IndicatorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError::UnknownIndicator(s.to_string()))
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A caller-owned indicator on a chart: kind, chosen parameters and identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorInstance {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: IndicatorKind,
    pub params: IndicatorParams,
}

impl IndicatorInstance {
    pub fn new(id: impl Into<String>, kind: IndicatorKind, params: IndicatorParams) -> Self {
        Self {
            id: id.into(),
            kind,
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("sma".parse::<IndicatorKind>().unwrap(), IndicatorKind::Sma);
        assert_eq!("volumeMA".parse::<IndicatorKind>().unwrap(), IndicatorKind::VolumeMa);
        assert_eq!("volumema".parse::<IndicatorKind>().unwrap(), IndicatorKind::VolumeMa);
        assert_eq!("MACDSIGNAL".parse::<IndicatorKind>().unwrap(), IndicatorKind::MacdSignal);
        assert!("kama".parse::<IndicatorKind>().is_err());
    }

    #[test]
    fn test_serde_tags_match_as_str() {
        for kind in IndicatorKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_pane_tags() {
        assert_eq!(serde_json::to_string(&IndicatorPane::Overlay).unwrap(), "\"overlay\"");
        assert_eq!(IndicatorPane::Separate.as_str(), "separate");
    }

    #[test]
    fn test_instance_json_shape() {
        let json = r#"{"id":"a1","type":"bollinger","params":{"length":20,"source":"close","stdDev":2}}"#;
        let instance: IndicatorInstance = serde_json::from_str(json).unwrap();
        assert_eq!(instance.kind, IndicatorKind::Bollinger);
        assert_eq!(instance.params.std_dev, Some(2.0));
    }
}
