// Candle CSV loading and JSON output
pub mod candle_csv;

pub use candle_csv::{read_candles, read_candles_csv, write_json};
