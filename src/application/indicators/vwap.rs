use crate::domain::indicators::{IndicatorParams, IndicatorPoint};
use crate::domain::market::candle::Candle;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use ta::{Close, High, Low, Next, Reset, Volume};
use tracing::{debug, warn};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses an anchor into epoch milliseconds.
///
/// Accepts RFC 3339 with an offset, a naive date-time, or a bare date (midnight
/// UTC). Naive date-times are read as UTC whatever the host zone; JavaScript's
/// `Date.parse` would read them as local time instead.
pub fn parse_anchor_ms(anchor: &str) -> Option<i64> {
    let anchor = anchor.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(anchor) {
        return Some(dt.timestamp_millis());
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(anchor, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(anchor, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Index of the first candle at or after the anchor; 0 when the anchor is
/// absent, unparsable, or later than every candle.
pub fn anchor_index(candles: &[Candle], params: &IndicatorParams) -> usize {
    let Some(anchor) = params.anchor() else {
        return 0;
    };
    let Some(anchor_ms) = parse_anchor_ms(anchor) else {
        warn!("VWAP: unparsable anchor '{}', anchoring at first candle", anchor);
        return 0;
    };
    match candles.iter().position(|c| c.timestamp >= anchor_ms) {
        Some(index) => index,
        None => {
            debug!("VWAP: anchor {} is after the last candle, anchoring at first candle", anchor);
            0
        }
    }
}

/// Running `Σ(typical · volume) / Σ volume`, falling back to the current
/// typical price while cumulative volume is zero.
#[derive(Debug, Clone, Default)]
pub struct CumulativeVwap {
    price_volume: f64,
    volume: f64,
}

impl CumulativeVwap {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: High + Low + Close + Volume> Next<&T> for CumulativeVwap {
    type Output = f64;

    fn next(&mut self, bar: &T) -> Self::Output {
        let typical = (bar.high() + bar.low() + bar.close()) / 3.0;
        self.price_volume += typical * bar.volume();
        self.volume += bar.volume();

        if self.volume == 0.0 {
            typical
        } else {
            self.price_volume / self.volume
        }
    }
}

impl Reset for CumulativeVwap {
    fn reset(&mut self) {
        self.price_volume = 0.0;
        self.volume = 0.0;
    }
}

/// Volume-weighted average price accumulated from the anchor candle onward
pub fn calculate_anchored_vwap(candles: &[Candle], params: &IndicatorParams) -> Vec<IndicatorPoint> {
    if candles.is_empty() {
        return Vec::new();
    }

    let start = anchor_index(candles, params);
    let mut vwap = CumulativeVwap::new();
    candles[start..]
        .iter()
        .map(|c| IndicatorPoint::new(c.timestamp, vwap.next(c)))
        .collect()
}
