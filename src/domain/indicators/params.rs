use crate::domain::errors::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_STD_DEV: f64 = 2.0;
pub const DEFAULT_MACD_FAST: usize = 12;
pub const DEFAULT_MACD_SLOW: usize = 26;
pub const DEFAULT_MACD_SIGNAL: usize = 9;

/// Which candle field an indicator reads as its scalar input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    Open,
    High,
    Low,
    #[default]
    Close,
}

impl PriceSource {
    pub fn extract<T>(&self, bar: &T) -> f64
    where
        T: ta::Open + ta::High + ta::Low + ta::Close,
    {
        match self {
            PriceSource::Open => bar.open(),
            PriceSource::High => bar.high(),
            PriceSource::Low => bar.low(),
            PriceSource::Close => bar.close(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceSource::Open => "open",
            PriceSource::High => "high",
            PriceSource::Low => "low",
            PriceSource::Close => "close",
        }
    }
}

impl FromStr for PriceSource {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(PriceSource::Open),
            "high" => Ok(PriceSource::High),
            "low" => Ok(PriceSource::Low),
            "close" => Ok(PriceSource::Close),
            _ => Err(ParseError::InvalidPriceSource(s.to_string())),
        }
    }
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coerces a user-supplied window length to `max(1, floor(length))`.
///
/// NaN maps to 1 and +inf saturates to `usize::MAX`, which no input can satisfy.
pub fn coerce_length(length: f64) -> usize {
    if length.is_nan() {
        return 1;
    }
    length.floor().max(1.0) as usize
}

/// Resolved MACD window lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdLengths {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

/// Parameters shared by every indicator. Each kind reads only the options it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorParams {
    pub length: f64,
    #[serde(default)]
    pub source: PriceSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macd_fast: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macd_slow: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macd_signal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_iso: Option<String>,
}

impl IndicatorParams {
    pub fn new(length: usize) -> Self {
        Self {
            length: length as f64,
            source: PriceSource::Close,
            std_dev: None,
            macd_fast: None,
            macd_slow: None,
            macd_signal: None,
            anchor_iso: None,
        }
    }

    pub fn with_source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_std_dev(mut self, std_dev: f64) -> Self {
        self.std_dev = Some(std_dev);
        self
    }

    pub fn with_macd(mut self, fast: usize, slow: usize, signal: usize) -> Self {
        self.macd_fast = Some(fast as f64);
        self.macd_slow = Some(slow as f64);
        self.macd_signal = Some(signal as f64);
        self
    }

    pub fn with_anchor(mut self, anchor_iso: impl Into<String>) -> Self {
        self.anchor_iso = Some(anchor_iso.into());
        self
    }

    /// Effective window length
    pub fn window(&self) -> usize {
        coerce_length(self.length)
    }

    pub fn std_dev_multiplier(&self) -> f64 {
        self.std_dev.unwrap_or(DEFAULT_STD_DEV)
    }

    pub fn macd_lengths(&self) -> MacdLengths {
        let resolve = |value: Option<f64>, default: usize| value.map_or(default, coerce_length);
        MacdLengths {
            fast: resolve(self.macd_fast, DEFAULT_MACD_FAST),
            slow: resolve(self.macd_slow, DEFAULT_MACD_SLOW),
            signal: resolve(self.macd_signal, DEFAULT_MACD_SIGNAL),
        }
    }

    /// Anchor string, treating an empty or blank value as absent
    pub fn anchor(&self) -> Option<&str> {
        self.anchor_iso
            .as_deref()
            .map(str::trim)
            .filter(|anchor| !anchor.is_empty())
    }

    pub fn apply(self, overrides: &ParamOverrides) -> Self {
        overrides.apply_to(self)
    }
}

/// Partial parameter set layered over a kind's defaults (presets, CLI flags)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ParamOverrides {
    pub length: Option<f64>,
    pub source: Option<PriceSource>,
    pub std_dev: Option<f64>,
    pub macd_fast: Option<f64>,
    pub macd_slow: Option<f64>,
    pub macd_signal: Option<f64>,
    pub anchor_iso: Option<String>,
}

impl ParamOverrides {
    pub fn is_empty(&self) -> bool {
        *self == ParamOverrides::default()
    }

    pub fn apply_to(&self, mut params: IndicatorParams) -> IndicatorParams {
        if let Some(length) = self.length {
            params.length = length;
        }
        if let Some(source) = self.source {
            params.source = source;
        }
        if self.std_dev.is_some() {
            params.std_dev = self.std_dev;
        }
        if self.macd_fast.is_some() {
            params.macd_fast = self.macd_fast;
        }
        if self.macd_slow.is_some() {
            params.macd_slow = self.macd_slow;
        }
        if self.macd_signal.is_some() {
            params.macd_signal = self.macd_signal;
        }
        if let Some(anchor) = &self.anchor_iso {
            params.anchor_iso = Some(anchor.clone());
        }
        params
    }
}
