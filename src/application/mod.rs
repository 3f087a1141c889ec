// Indicator computations, registry and batch engine
pub mod indicators;

// Candle resampling
pub mod market_data;
