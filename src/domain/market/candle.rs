use serde::{Deserialize, Serialize};

/// One OHLCV bar. Timestamps are Unix milliseconds marking the bar open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Candle with all four prices equal to `price`.
    pub fn flat(timestamp: i64, price: f64, volume: f64) -> Self {
        Self::new(timestamp, price, price, price, price, volume)
    }

    /// (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Checks `low <= min(open, close) <= max(open, close) <= high` and `volume >= 0`.
    ///
    /// The resampler and the indicators process malformed bars as given; only the
    /// CSV loader checks this, and it just reports them.
    pub fn is_well_formed(&self) -> bool {
        let body_low = self.open.min(self.close);
        let body_high = self.open.max(self.close);
        self.low <= body_low && body_high <= self.high && self.volume >= 0.0
    }
}

impl ta::Open for Candle {
    fn open(&self) -> f64 {
        self.open
    }
}

impl ta::High for Candle {
    fn high(&self) -> f64 {
        self.high
    }
}

impl ta::Low for Candle {
    fn low(&self) -> f64 {
        self.low
    }
}

impl ta::Close for Candle {
    fn close(&self) -> f64 {
        self.close
    }
}

impl ta::Volume for Candle {
    fn volume(&self) -> f64 {
        self.volume
    }
}

/// Returns a copy of `candles` stably sorted by timestamp. The input is left untouched.
pub fn sorted_by_time(candles: &[Candle]) -> Vec<Candle> {
    let mut sorted = candles.to_vec();
    sorted.sort_by_key(|c| c.timestamp);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typical_price() {
        let candle = Candle::new(0, 10.0, 12.0, 9.0, 11.0, 100.0);
        assert!((candle.typical_price() - 32.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_well_formed() {
        assert!(Candle::new(0, 10.0, 12.0, 9.0, 11.0, 100.0).is_well_formed());
        assert!(Candle::flat(0, 10.0, 0.0).is_well_formed());
        // High below close
        assert!(!Candle::new(0, 10.0, 10.5, 9.0, 11.0, 100.0).is_well_formed());
        // Negative volume
        assert!(!Candle::new(0, 10.0, 12.0, 9.0, 11.0, -1.0).is_well_formed());
    }

    #[test]
    fn test_sorted_by_time_is_stable_and_non_mutating() {
        let candles = vec![
            Candle::flat(3, 3.0, 1.0),
            Candle::flat(1, 1.0, 1.0),
            Candle::flat(3, 4.0, 1.0),
            Candle::flat(2, 2.0, 1.0),
        ];

        let sorted = sorted_by_time(&candles);

        let closes: Vec<f64> = sorted.iter().map(|c| c.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0, 4.0]);
        // Original order preserved
        assert_eq!(candles[0].timestamp, 3);
        assert_eq!(candles[1].timestamp, 1);
    }

    #[test]
    fn test_ta_traits() {
        use ta::{Close, High, Low, Open, Volume};

        let candle = Candle::new(0, 1.0, 4.0, 0.5, 2.0, 7.0);
        assert_eq!(Open::open(&candle), 1.0);
        assert_eq!(High::high(&candle), 4.0);
        assert_eq!(Low::low(&candle), 0.5);
        assert_eq!(Close::close(&candle), 2.0);
        assert_eq!(Volume::volume(&candle), 7.0);
    }
}
