// Market data domain
pub mod bucket;
pub mod candle;
pub mod session;
pub mod timeframe;
