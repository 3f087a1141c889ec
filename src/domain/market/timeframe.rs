use crate::domain::errors::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MINUTE_MS: i64 = 60_000;

/// Length of the regular New York session (09:30–16:00) in minutes
pub const SESSION_MINUTES: i64 = 390;

/// Default history window requested for a chart, independent of timeframe
pub const DEFAULT_LOOKBACK_DAYS: i64 = 90;

/// Chart timeframes. Every timeframe except `OneDay` is a fixed number of
/// minutes aligned to the Unix epoch; `OneDay` follows the exchange session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    OneMin,
    #[serde(rename = "5m")]
    FiveMin,
    #[serde(rename = "10m")]
    TenMin,
    #[serde(rename = "30m")]
    ThirtyMin,
    #[serde(rename = "60m")]
    SixtyMin,
    #[serde(rename = "1d")]
    OneDay,
}

/// All supported timeframes in ascending order
pub const TIMEFRAMES: [Timeframe; 6] = [
    Timeframe::OneMin,
    Timeframe::FiveMin,
    Timeframe::TenMin,
    Timeframe::ThirtyMin,
    Timeframe::SixtyMin,
    Timeframe::OneDay,
];

impl Timeframe {
    /// Fixed bucket width in minutes, or `None` for the session-aligned daily timeframe
    pub fn bucket_minutes(&self) -> Option<i64> {
        match self {
            Timeframe::OneMin => Some(1),
            Timeframe::FiveMin => Some(5),
            Timeframe::TenMin => Some(10),
            Timeframe::ThirtyMin => Some(30),
            Timeframe::SixtyMin => Some(60),
            Timeframe::OneDay => None,
        }
    }

    /// Nominal bar duration in milliseconds. A daily bar spans one regular session.
    pub fn nominal_duration_ms(&self) -> i64 {
        self.bucket_minutes().unwrap_or(SESSION_MINUTES) * MINUTE_MS
    }

    /// Wire tag used in query strings and serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::OneMin => "1m",
            Timeframe::FiveMin => "5m",
            Timeframe::TenMin => "10m",
            Timeframe::ThirtyMin => "30m",
            Timeframe::SixtyMin => "60m",
            Timeframe::OneDay => "1d",
        }
    }

    pub fn all() -> &'static [Timeframe] {
        &TIMEFRAMES
    }

    /// Returns the start timestamp (ms) of the epoch-aligned bucket containing `timestamp_ms`.
    ///
    /// Floors toward negative infinity so pre-1970 timestamps land in the bucket
    /// that precedes them. Returns `None` for `OneDay`; use
    /// [`session_start_ms`](crate::domain::market::session::session_start_ms) instead.
    pub fn period_start(&self, timestamp_ms: i64) -> Option<i64> {
        let width = self.bucket_minutes()? * MINUTE_MS;
        timestamp_ms.div_euclid(width).checked_mul(width)
    }
}

impl FromStr for Timeframe {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1m" | "1min" => Ok(Timeframe::OneMin),
            "5m" | "5min" => Ok(Timeframe::FiveMin),
            "10m" | "10min" => Ok(Timeframe::TenMin),
            "30m" | "30min" => Ok(Timeframe::ThirtyMin),
            "60m" | "60min" | "1h" => Ok(Timeframe::SixtyMin),
            "1d" | "1day" | "d" => Ok(Timeframe::OneDay),
            _ => Err(ParseError::InvalidTimeframe(s.to_string())),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
