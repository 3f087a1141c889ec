//! Indicator computations over candle series.
//!
//! Every `calculate_*` function is pure and causal: a point stamped with candle `i`
//! reads only candles `0..=i`. Too little data yields an empty vector.

pub mod atr;
pub mod bollinger;
pub mod engine;
pub mod macd;
pub mod moving_average;
pub mod registry;
pub mod rsi;
pub mod smoothing;
pub mod volume;
pub mod vwap;

pub use atr::calculate_atr;
pub use bollinger::calculate_bollinger;
pub use engine::IndicatorEngine;
pub use macd::{
    MacdSeries, calculate_macd, calculate_macd_histogram, calculate_macd_series,
    calculate_macd_signal,
};
pub use moving_average::{calculate_ema, calculate_sma};
pub use registry::{IndicatorCompute, IndicatorDefinition, indicator_registry};
pub use rsi::calculate_rsi;
pub use volume::{calculate_volume, calculate_volume_ma};
pub use vwap::calculate_anchored_vwap;

use tracing::debug;

fn has_enough(indicator: &str, available: usize, required: usize) -> bool {
    if available < required {
        debug!(
            "{}: {} candles available, {} required",
            indicator, available, required
        );
        return false;
    }
    true
}
