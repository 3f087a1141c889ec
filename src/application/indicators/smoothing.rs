//! Stateful accumulators behind the indicator recurrences.
//!
//! Each accumulator consumes one input per candle through [`ta::Next`] and reports
//! `None` until its window is seeded. The batch `calculate_*` functions are thin
//! loops over these, so feeding candles one at a time yields the same numbers.

use std::collections::VecDeque;
use ta::{Next, Reset};

/// Mean over the last `length` inputs, maintained as an add/subtract rolling sum
#[derive(Debug, Clone)]
pub struct RollingMean {
    length: usize,
    window: VecDeque<f64>,
    sum: f64,
}

impl RollingMean {
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
            window: VecDeque::new(),
            sum: 0.0,
        }
    }
}

impl Next<f64> for RollingMean {
    type Output = Option<f64>;

    fn next(&mut self, input: f64) -> Self::Output {
        self.sum += input;
        self.window.push_back(input);
        if self.window.len() > self.length
            && let Some(removed) = self.window.pop_front()
        {
            self.sum -= removed;
        }

        if self.window.len() == self.length {
            Some(self.sum / self.length as f64)
        } else {
            None
        }
    }
}

impl Reset for RollingMean {
    fn reset(&mut self) {
        self.window.clear();
        self.sum = 0.0;
    }
}

/// EMA seeded with the simple average of its first `length` inputs.
///
/// After seeding: `ema = value * alpha + ema * (1 - alpha)` with `alpha = 2 / (length + 1)`.
#[derive(Debug, Clone)]
pub struct SeededEma {
    length: usize,
    alpha: f64,
    seed_sum: f64,
    seen: usize,
    current: Option<f64>,
}

impl SeededEma {
    pub fn new(length: usize) -> Self {
        let length = length.max(1);
        Self {
            length,
            alpha: 2.0 / (length as f64 + 1.0),
            seed_sum: 0.0,
            seen: 0,
            current: None,
        }
    }
}

impl Next<f64> for SeededEma {
    type Output = Option<f64>;

    fn next(&mut self, input: f64) -> Self::Output {
        self.current = match self.current {
            Some(ema) => Some(input * self.alpha + ema * (1.0 - self.alpha)),
            None => {
                self.seed_sum += input;
                self.seen += 1;
                (self.seen == self.length).then(|| self.seed_sum / self.length as f64)
            }
        };
        self.current
    }
}

impl Reset for SeededEma {
    fn reset(&mut self) {
        self.seed_sum = 0.0;
        self.seen = 0;
        self.current = None;
    }
}

/// Wilder's running average: seeded with the mean of the first `length` inputs,
/// then `avg = (avg * (length - 1) + input) / length`.
///
/// The smoothing constant is `1 / length`, not the EMA's `2 / (length + 1)`.
#[derive(Debug, Clone)]
pub struct WilderAverage {
    length: usize,
    seed_sum: f64,
    seen: usize,
    current: Option<f64>,
}

impl WilderAverage {
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
            seed_sum: 0.0,
            seen: 0,
            current: None,
        }
    }

    pub fn is_seeded(&self) -> bool {
        self.current.is_some()
    }
}

impl Next<f64> for WilderAverage {
    type Output = Option<f64>;

    fn next(&mut self, input: f64) -> Self::Output {
        let n = self.length as f64;
        self.current = match self.current {
            Some(avg) => Some((avg * (self.length - 1) as f64 + input) / n),
            None => {
                self.seed_sum += input;
                self.seen += 1;
                (self.seen == self.length).then(|| self.seed_sum / n)
            }
        };
        self.current
    }
}

impl Reset for WilderAverage {
    fn reset(&mut self) {
        self.seed_sum = 0.0;
        self.seen = 0;
        self.current = None;
    }
}
