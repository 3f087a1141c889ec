// Market data processing modules
pub mod resampler;

pub use resampler::{resample, trim_to_lookback};
