use crate::domain::market::candle::Candle;

/// Accumulates the candles that fall into one resampling bucket
#[derive(Debug, Clone, PartialEq)]
pub struct CandleBucket {
    /// Bucket start (ms); becomes the output candle's timestamp
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl CandleBucket {
    /// Opens a bucket with its first (earliest) candle
    pub fn new(timestamp: i64, first: &Candle) -> Self {
        Self {
            timestamp,
            open: first.open,
            high: first.high,
            low: first.low,
            close: first.close,
            volume: first.volume,
        }
    }

    /// Merges a later candle: open stays, high/low widen, close moves, volume sums.
    /// A NaN high or low sticks to the bucket.
    pub fn update(&mut self, candle: &Candle) {
        if candle.high > self.high || candle.high.is_nan() {
            self.high = candle.high;
        }
        if candle.low < self.low || candle.low.is_nan() {
            self.low = candle.low;
        }
        self.close = candle.close;
        self.volume += candle.volume;
    }

    pub fn to_candle(&self) -> Candle {
        Candle::new(
            self.timestamp,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
        )
    }
}
