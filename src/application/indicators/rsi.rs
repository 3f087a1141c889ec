use crate::application::indicators::has_enough;
use crate::application::indicators::smoothing::WilderAverage;
use crate::domain::indicators::{IndicatorParams, IndicatorPoint};
use crate::domain::market::candle::Candle;
use ta::{Next, Reset};

/// Relative Strength Index with Wilder smoothing, fed one source value per candle.
///
/// Emits `None` until `length` price changes have been seen.
#[derive(Debug, Clone)]
pub struct RsiState {
    prev: Option<f64>,
    avg_gain: WilderAverage,
    avg_loss: WilderAverage,
}

impl RsiState {
    pub fn new(length: usize) -> Self {
        Self {
            prev: None,
            avg_gain: WilderAverage::new(length),
            avg_loss: WilderAverage::new(length),
        }
    }
}

impl Next<f64> for RsiState {
    type Output = Option<f64>;

    fn next(&mut self, input: f64) -> Self::Output {
        let prev = self.prev.replace(input)?;
        let change = input - prev;

        // While seeding, a non-finite change lands on the loss side, afterwards it counts as neither
        let (gain, loss) = if !self.avg_gain.is_seeded() {
            if change >= 0.0 { (change, 0.0) } else { (0.0, change.abs()) }
        } else {
            let gain = if change > 0.0 { change } else { 0.0 };
            let loss = if change < 0.0 { change.abs() } else { 0.0 };
            (gain, loss)
        };

        let avg_gain = self.avg_gain.next(gain);
        let avg_loss = self.avg_loss.next(loss);
        Some(rsi_from_averages(avg_gain?, avg_loss?))
    }
}

impl Reset for RsiState {
    fn reset(&mut self) {
        self.prev = None;
        self.avg_gain.reset();
        self.avg_loss.reset();
    }
}

/// `100 - 100 / (1 + gain / loss)`, saturating at 100 when there were no losses
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    let rs = if avg_loss == 0.0 {
        f64::INFINITY
    } else {
        avg_gain / avg_loss
    };
    100.0 - 100.0 / (1.0 + rs)
}

/// RSI of `params.source`. Needs `length + 1` candles; first point on candle `length`.
pub fn calculate_rsi(candles: &[Candle], params: &IndicatorParams) -> Vec<IndicatorPoint> {
    let length = params.window();
    if !has_enough("RSI", candles.len(), length.saturating_add(1)) {
        return Vec::new();
    }

    let mut rsi = RsiState::new(length);
    candles
        .iter()
        .filter_map(|candle| {
            rsi.next(params.source.extract(candle))
                .map(|value| IndicatorPoint::new(candle.timestamp, value))
        })
        .collect()
}
