use crate::application::indicators::has_enough;
use crate::application::indicators::smoothing::{RollingMean, SeededEma};
use crate::domain::indicators::{IndicatorParams, IndicatorPoint};
use crate::domain::market::candle::Candle;
use ta::Next;

/// Simple moving average of `params.source` over `params.length` candles.
///
/// First point sits on candle `length - 1`.
pub fn calculate_sma(candles: &[Candle], params: &IndicatorParams) -> Vec<IndicatorPoint> {
    let length = params.window();
    if !has_enough("SMA", candles.len(), length) {
        return Vec::new();
    }

    let mut mean = RollingMean::new(length);
    candles
        .iter()
        .filter_map(|candle| {
            mean.next(params.source.extract(candle))
                .map(|value| IndicatorPoint::new(candle.timestamp, value))
        })
        .collect()
}

/// Exponential moving average seeded with the SMA of the first `length` candles.
pub fn calculate_ema(candles: &[Candle], params: &IndicatorParams) -> Vec<IndicatorPoint> {
    let length = params.window();
    if !has_enough("EMA", candles.len(), length) {
        return Vec::new();
    }

    let mut ema = SeededEma::new(length);
    candles
        .iter()
        .filter_map(|candle| {
            ema.next(params.source.extract(candle))
                .map(|value| IndicatorPoint::new(candle.timestamp, value))
        })
        .collect()
}

/// Seeded EMA over a bare value series. Output index 0 corresponds to input index `length - 1`.
pub(crate) fn ema_values(values: &[f64], length: usize) -> Vec<f64> {
    let mut ema = SeededEma::new(length);
    values.iter().filter_map(|&v| ema.next(v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicators::PriceSource;

    fn closes(values: &[f64]) -> Vec<Candle> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Candle::flat(i as i64 * 60_000, v, 1.0))
            .collect()
    }

    #[test]
    fn test_sma_linear_series() {
        let candles = closes(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        let points = calculate_sma(&candles, &IndicatorParams::new(3));

        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(points[0].timestamp, candles[2].timestamp);
    }

    #[test]
    fn test_ema_linear_series() {
        let candles = closes(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        let points = calculate_ema(&candles, &IndicatorParams::new(3));

        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(points.last().unwrap().timestamp, candles[9].timestamp);
    }

    #[test]
    fn test_sma_reads_selected_source() {
        let candles: Vec<Candle> = (0..4)
            .map(|i| Candle::new(i, 1.0, 10.0 + i as f64, 0.0, 2.0, 1.0))
            .collect();
        let params = IndicatorParams::new(2).with_source(PriceSource::High);

        let values: Vec<f64> = calculate_sma(&candles, &params).iter().map(|p| p.value).collect();
        assert_eq!(values, vec![10.5, 11.5, 12.5]);
    }

    #[test]
    fn test_fractional_length_is_floored() {
        let candles = closes(&[1.0, 2.0, 3.0, 4.0]);
        let mut params = IndicatorParams::new(2);
        params.length = 2.9;

        assert_eq!(calculate_sma(&candles, &params).len(), 3);
    }

    #[test]
    fn test_too_short() {
        let candles = closes(&[1.0, 2.0]);
        assert!(calculate_sma(&candles, &IndicatorParams::new(3)).is_empty());
        assert!(calculate_ema(&candles, &IndicatorParams::new(3)).is_empty());
        assert!(calculate_sma(&[], &IndicatorParams::new(1)).is_empty());
    }

    #[test]
    fn test_ema_values_alignment() {
        let out = ema_values(&[2.0, 4.0, 6.0, 10.0], 3);
        assert_eq!(out, vec![4.0, 7.0]);
        assert!(ema_values(&[1.0], 3).is_empty());
    }
}
