//! Candle CSV input and JSON output for the command-line tool.
//!
//! CSV files need a header row naming `timestamp,open,high,low,close,volume`
//! (any column order). Timestamps are Unix milliseconds.

use crate::domain::errors::CandleSourceError;
use crate::domain::market::candle::Candle;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{info, warn};

pub fn read_candles_csv(path: &Path) -> Result<Vec<Candle>, CandleSourceError> {
    let file = File::open(path).map_err(|source| CandleSourceError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let candles = read_candles(BufReader::new(file))?;
    info!("Loaded {} candles from {}", candles.len(), path.display());
    Ok(candles)
}

/// Decodes candles from any CSV reader, rejecting non-finite fields.
///
/// Bars that are not well formed (high below the body, negative volume) are kept
/// and counted in a warning.
pub fn read_candles<R: Read>(reader: R) -> Result<Vec<Candle>, CandleSourceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut candles = Vec::new();
    let mut malformed = 0usize;

    for (index, result) in rdr.deserialize::<Candle>().enumerate() {
        let candle = result?;
        // Header is line 1
        let line = index as u64 + 2;

        let fields = [
            candle.open,
            candle.high,
            candle.low,
            candle.close,
            candle.volume,
        ];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(CandleSourceError::InvalidRecord {
                line,
                reason: "prices and volume must be finite".to_string(),
            });
        }
        if !candle.is_well_formed() {
            malformed += 1;
        }
        candles.push(candle);
    }

    if malformed > 0 {
        warn!("{} candles have inconsistent OHLC or negative volume", malformed);
    }

    Ok(candles)
}

/// Pretty-prints `value` as JSON to `output`, or to stdout when no path is given
pub fn write_json<T: Serialize + ?Sized>(value: &T, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .context(format!("Failed to create output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value).context("Failed to encode JSON")?;
            writer.flush()?;
            info!("Wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, value).context("Failed to encode JSON")?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_candles() {
        let data = "timestamp,open,high,low,close,volume\n\
                    1704205800000,100,101,99,100.5,10\n\
                    1704205860000, 100.5, 102, 100, 101, 11\n";

        let candles = read_candles(data.as_bytes()).unwrap();

        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0], Candle::new(1_704_205_800_000, 100.0, 101.0, 99.0, 100.5, 10.0));
        assert_eq!(candles[1].open, 100.5);
    }

    #[test]
    fn test_column_order_follows_header() {
        let data = "close,volume,timestamp,open,high,low\n2,5,60000,1,3,0.5\n";
        let candles = read_candles(data.as_bytes()).unwrap();
        assert_eq!(candles[0], Candle::new(60_000, 1.0, 3.0, 0.5, 2.0, 5.0));
    }

    #[test]
    fn test_malformed_bars_are_kept() {
        let data = "timestamp,open,high,low,close,volume\n0,10,9,8,11,-1\n";
        let candles = read_candles(data.as_bytes()).unwrap();
        assert_eq!(candles.len(), 1);
        assert!(!candles[0].is_well_formed());
    }

    #[test]
    fn test_non_numeric_field_is_csv_error() {
        let data = "timestamp,open,high,low,close,volume\n0,abc,1,1,1,1\n";
        let err = read_candles(data.as_bytes()).unwrap_err();
        assert!(matches!(err, CandleSourceError::Csv(_)));
    }

    #[test]
    fn test_non_finite_field_reports_line() {
        let data = "timestamp,open,high,low,close,volume\n0,1,1,1,1,1\n60000,NaN,1,1,1,1\n";
        let err = read_candles(data.as_bytes()).unwrap_err();
        match err {
            CandleSourceError::InvalidRecord { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_candles_csv(Path::new("/nonexistent/candles.csv")).unwrap_err();
        assert!(matches!(err, CandleSourceError::Io { .. }));
    }

    #[test]
    fn test_write_json_to_file() {
        let path = std::env::temp_dir().join(format!("chartcore-{}.json", std::process::id()));
        let candles = vec![Candle::flat(0, 1.0, 2.0)];

        write_json(&candles, Some(&path)).unwrap();

        let written: Vec<Candle> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, candles);
        std::fs::remove_file(&path).ok();
    }
}
