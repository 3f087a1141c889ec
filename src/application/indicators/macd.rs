use crate::application::indicators::has_enough;
use crate::application::indicators::moving_average::ema_values;
use crate::domain::indicators::{IndicatorParams, IndicatorPoint, MacdLengths};
use crate::domain::market::candle::Candle;
use tracing::warn;

/// The three MACD lines, each aligned to the same candles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdSeries {
    pub line: Vec<IndicatorPoint>,
    pub signal: Vec<IndicatorPoint>,
    pub histogram: Vec<IndicatorPoint>,
}

/// One aligned MACD sample
#[derive(Debug, Clone, Copy, PartialEq)]
struct MacdSample {
    timestamp: i64,
    line: f64,
    signal: f64,
}

/// Shared derivation behind every MACD output.
///
/// The fast EMA starts `slow - fast` values earlier than the slow one, so the
/// MACD line pairs `fast[i + offset]` with `slow[i]`. The signal EMA over that line
/// starts `signal - 1` values later again, which puts the first sample on candle
/// `slow + signal - 2`.
fn macd_samples(candles: &[Candle], params: &IndicatorParams) -> Vec<MacdSample> {
    let MacdLengths { fast, slow, signal } = params.macd_lengths();
    if fast > slow {
        warn!(
            "MACD: fast length {} exceeds slow length {}, nothing to compute",
            fast, slow
        );
        return Vec::new();
    }
    if !has_enough("MACD", candles.len(), slow.saturating_add(signal)) {
        return Vec::new();
    }

    let values: Vec<f64> = candles.iter().map(|c| params.source.extract(c)).collect();
    let fast_ema = ema_values(&values, fast);
    let slow_ema = ema_values(&values, slow);

    let offset = slow - fast;
    let macd_line: Vec<f64> = slow_ema
        .iter()
        .enumerate()
        .map(|(i, slow_value)| fast_ema[i + offset] - slow_value)
        .collect();

    let signal_line = ema_values(&macd_line, signal);
    let start_index = slow - 1 + signal - 1;

    signal_line
        .iter()
        .enumerate()
        .map(|(i, &signal_value)| MacdSample {
            timestamp: candles[start_index + i].timestamp,
            line: macd_line[i + signal - 1],
            signal: signal_value,
        })
        .collect()
}

fn project(samples: &[MacdSample], pick: impl Fn(&MacdSample) -> f64) -> Vec<IndicatorPoint> {
    samples
        .iter()
        .map(|s| IndicatorPoint::new(s.timestamp, pick(s)))
        .collect()
}

/// MACD line: fast EMA minus slow EMA
pub fn calculate_macd(candles: &[Candle], params: &IndicatorParams) -> Vec<IndicatorPoint> {
    project(&macd_samples(candles, params), |s| s.line)
}

/// Signal line: EMA of the MACD line
pub fn calculate_macd_signal(candles: &[Candle], params: &IndicatorParams) -> Vec<IndicatorPoint> {
    project(&macd_samples(candles, params), |s| s.signal)
}

/// Histogram: MACD line minus signal line
pub fn calculate_macd_histogram(
    candles: &[Candle],
    params: &IndicatorParams,
) -> Vec<IndicatorPoint> {
    project(&macd_samples(candles, params), |s| s.line - s.signal)
}

/// All three MACD outputs from a single derivation
pub fn calculate_macd_series(candles: &[Candle], params: &IndicatorParams) -> MacdSeries {
    let samples = macd_samples(candles, params);
    MacdSeries {
        line: project(&samples, |s| s.line),
        signal: project(&samples, |s| s.signal),
        histogram: project(&samples, |s| s.line - s.signal),
    }
}
