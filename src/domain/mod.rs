// Indicator kinds, parameters and output points
pub mod indicators;

// Candles, timeframes and the trading session calendar
pub mod market;

// Domain-specific error types
pub mod errors;
