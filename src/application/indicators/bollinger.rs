use crate::application::indicators::has_enough;
use crate::domain::indicators::{IndicatorParams, IndicatorPoint};
use crate::domain::market::candle::Candle;

/// Bollinger Bands: window mean as `value`, `upper`/`lower` at `stdDev` population
/// standard deviations from it.
///
/// Each window is summed afresh rather than rolled, so the middle line can differ
/// from [`calculate_sma`](super::moving_average::calculate_sma) in the last bits.
pub fn calculate_bollinger(candles: &[Candle], params: &IndicatorParams) -> Vec<IndicatorPoint> {
    let length = params.window();
    if !has_enough("Bollinger", candles.len(), length) {
        return Vec::new();
    }

    let multiplier = params.std_dev_multiplier();
    let n = length as f64;
    let values: Vec<f64> = candles.iter().map(|c| params.source.extract(c)).collect();

    values
        .windows(length)
        .zip(&candles[length - 1..])
        .map(|(window, candle)| {
            let mean = window.iter().sum::<f64>() / n;
            let variance = window
                .iter()
                .map(|v| {
                    let diff = v - mean;
                    diff * diff
                })
                .sum::<f64>()
                / n;
            let sigma = variance.sqrt();

            IndicatorPoint::with_band(
                candle.timestamp,
                mean,
                mean + multiplier * sigma,
                mean - multiplier * sigma,
            )
        })
        .collect()
}
