use thiserror::Error;

/// Errors raised when turning user-supplied text into domain values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid timeframe: '{0}'. Valid options: 1m, 5m, 10m, 30m, 60m, 1d")]
    InvalidTimeframe(String),

    #[error("Unknown indicator type: '{0}'")]
    UnknownIndicator(String),

    #[error("Invalid price source: '{0}'. Valid options: open, high, low, close")]
    InvalidPriceSource(String),
}

/// Errors related to loading candle data from files
#[derive(Debug, Error)]
pub enum CandleSourceError {
    #[error("Failed to read candle file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed candle record at line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
