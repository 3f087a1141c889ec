//! Chart data command-line tool
//!
//! Resamples one-minute candle CSV files and computes indicator series over them,
//! writing JSON for a charting front end.

use anyhow::{Context, Result};
use chartcore::application::indicators::{IndicatorEngine, indicator_registry};
use chartcore::application::market_data::{resample, trim_to_lookback};
use chartcore::config::{Config, load_presets};
use chartcore::domain::indicators::{
    IndicatorInstance, IndicatorKind, ParamOverrides, PriceSource,
};
use chartcore::domain::market::candle::Candle;
use chartcore::domain::market::timeframe::Timeframe;
use chartcore::infrastructure::{read_candles_csv, write_json};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Candle resampler and indicator engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resample one-minute candles into a coarser timeframe
    Resample {
        /// Candle CSV (timestamp,open,high,low,close,volume)
        #[arg(short, long)]
        input: PathBuf,

        /// Target timeframe (1m, 5m, 10m, 30m, 60m, 1d)
        #[arg(short, long)]
        timeframe: Option<Timeframe>,

        /// Output JSON file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compute a single indicator
    Indicator {
        #[arg(short, long)]
        input: PathBuf,

        /// Indicator type (sma, ema, rsi, vwap, macd, macdSignal, macdHistogram, bollinger, volume, volumeMA, atr)
        #[arg(short, long)]
        kind: IndicatorKind,

        #[arg(short, long)]
        timeframe: Option<Timeframe>,

        /// Window length, defaults to the indicator's own
        #[arg(long)]
        length: Option<f64>,

        /// Price field (open, high, low, close)
        #[arg(long)]
        source: Option<PriceSource>,

        /// Bollinger band width in standard deviations
        #[arg(long)]
        std_dev: Option<f64>,

        #[arg(long)]
        macd_fast: Option<f64>,

        #[arg(long)]
        macd_slow: Option<f64>,

        #[arg(long)]
        macd_signal: Option<f64>,

        /// VWAP anchor (e.g. 2024-01-02T14:30:00Z)
        #[arg(long)]
        anchor: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compute every indicator from a preset file
    Batch {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        timeframe: Option<Timeframe>,

        /// TOML preset file, falls back to CHART_INDICATORS_FILE, then to every indicator with defaults
        #[arg(short, long)]
        presets: Option<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List available indicators
    List,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so JSON on stdout stays clean
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(stderr_layer)
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Resample {
            input,
            timeframe,
            output,
        } => {
            let timeframe = timeframe.unwrap_or(config.default_timeframe);
            let candles = load_candles(&input, &config, timeframe)?;
            write_json(&candles, output.as_deref())?;
        }
        Commands::Indicator {
            input,
            kind,
            timeframe,
            length,
            source,
            std_dev,
            macd_fast,
            macd_slow,
            macd_signal,
            anchor,
            output,
        } => {
            let timeframe = timeframe.unwrap_or(config.default_timeframe);
            let candles = load_candles(&input, &config, timeframe)?;

            let overrides = ParamOverrides {
                length,
                source,
                std_dev,
                macd_fast,
                macd_slow,
                macd_signal,
                anchor_iso: anchor,
            };
            let params = kind.default_params().apply(&overrides);
            let instance = IndicatorInstance::new(kind.as_str(), kind, params);

            let series = IndicatorEngine::new(false).compute(&candles, &instance);
            info!("{}: {} points", series.label, series.points.len());
            write_json(&series, output.as_deref())?;
        }
        Commands::Batch {
            input,
            timeframe,
            presets,
            output,
        } => {
            let timeframe = timeframe.unwrap_or(config.default_timeframe);
            let instances = match presets.as_deref().or(config.indicators_file.as_deref()) {
                Some(path) => load_presets(path)?,
                None => {
                    info!("No presets given, computing every indicator with defaults");
                    default_instances()
                }
            };

            let candles = load_candles(&input, &config, timeframe)?;
            let engine = IndicatorEngine::new(config.parallel);
            let series = engine.compute_all(&candles, &instances);
            write_json(&series, output.as_deref())?;
        }
        Commands::List => {
            println!("{:<15} {:<17} {:<9} DEFAULT LABEL", "TYPE", "NAME", "PANE");
            for definition in indicator_registry() {
                println!(
                    "{:<15} {:<17} {:<9} {}",
                    definition.kind.as_str(),
                    definition.name,
                    definition.pane.as_str(),
                    definition.label(&definition.default_params)
                );
            }
        }
    }

    Ok(())
}

fn load_candles(path: &Path, config: &Config, timeframe: Timeframe) -> Result<Vec<Candle>> {
    let raw = read_candles_csv(path)?;
    let recent = trim_to_lookback(&raw, config.lookback_days);
    let candles = resample(&recent, timeframe);
    info!(
        "Resampled {} candles into {} {} candles",
        recent.len(),
        candles.len(),
        timeframe
    );
    Ok(candles)
}

fn default_instances() -> Vec<IndicatorInstance> {
    IndicatorKind::ALL
        .into_iter()
        .map(|kind| IndicatorInstance::new(kind.as_str(), kind, kind.default_params()))
        .collect()
}
