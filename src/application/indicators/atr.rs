use crate::application::indicators::has_enough;
use crate::application::indicators::smoothing::WilderAverage;
use crate::domain::indicators::{IndicatorParams, IndicatorPoint};
use crate::domain::market::candle::Candle;
use ta::{Close, High, Low, Next, Reset};

/// `max(high - low, |high - prev_close|, |low - prev_close|)`
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// Average True Range with Wilder smoothing. The first bar only primes the previous close.
#[derive(Debug, Clone)]
pub struct AtrState {
    prev_close: Option<f64>,
    average: WilderAverage,
}

impl AtrState {
    pub fn new(length: usize) -> Self {
        Self {
            prev_close: None,
            average: WilderAverage::new(length),
        }
    }
}

impl<T: High + Low + Close> Next<&T> for AtrState {
    type Output = Option<f64>;

    fn next(&mut self, bar: &T) -> Self::Output {
        let prev_close = self.prev_close.replace(bar.close())?;
        self.average.next(true_range(bar.high(), bar.low(), prev_close))
    }
}

impl Reset for AtrState {
    fn reset(&mut self) {
        self.prev_close = None;
        self.average.reset();
    }
}

/// ATR over `params.length` true ranges. Needs `length + 1` candles; first point on candle `length`.
pub fn calculate_atr(candles: &[Candle], params: &IndicatorParams) -> Vec<IndicatorPoint> {
    let length = params.window();
    if !has_enough("ATR", candles.len(), length.saturating_add(1)) {
        return Vec::new();
    }

    let mut atr = AtrState::new(length);
    candles
        .iter()
        .filter_map(|candle| {
            atr.next(candle)
                .map(|value| IndicatorPoint::new(candle.timestamp, value))
        })
        .collect()
}
