//! Configuration module for chartcore.
//!
//! Settings come from environment variables (optionally seeded from a `.env`
//! file by the binary), and indicator presets from a TOML file.

mod indicator_presets;

pub use indicator_presets::{PresetEntry, PresetFile, load_presets, parse_presets};

use crate::domain::market::timeframe::{DEFAULT_LOOKBACK_DAYS, Timeframe};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Main application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Timeframe used when a command does not name one
    pub default_timeframe: Timeframe,
    /// History window kept before resampling, counted back from the latest candle
    pub lookback_days: i64,
    pub indicators_file: Option<PathBuf>,
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_timeframe: Timeframe::FiveMin,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            indicators_file: None,
            parallel: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, so tests need not touch the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let default_timeframe = match lookup("CHART_TIMEFRAME") {
            Some(value) => Timeframe::from_str(&value).context("Failed to parse CHART_TIMEFRAME")?,
            None => defaults.default_timeframe,
        };

        let lookback_days = Self::parse_or(&lookup, "CHART_LOOKBACK_DAYS", defaults.lookback_days)?;
        if lookback_days <= 0 {
            anyhow::bail!(
                "Invalid CHART_LOOKBACK_DAYS: {}. Must be a positive number of days",
                lookback_days
            );
        }

        let indicators_file = lookup("CHART_INDICATORS_FILE")
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            default_timeframe,
            lookback_days,
            indicators_file,
            parallel: Self::parse_or(&lookup, "CHART_PARALLEL", defaults.parallel)?,
        })
    }

    fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match lookup(key) {
            Some(value) => value
                .trim()
                .parse::<T>()
                .context(format!("Failed to parse {}", key)),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_timeframe, Timeframe::FiveMin);
        assert_eq!(config.lookback_days, 90);
        assert!(config.parallel);
        assert!(config.indicators_file.is_none());
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("CHART_TIMEFRAME", "1d"),
            ("CHART_LOOKBACK_DAYS", "30"),
            ("CHART_INDICATORS_FILE", "presets.toml"),
            ("CHART_PARALLEL", "false"),
        ]))
        .unwrap();

        assert_eq!(config.default_timeframe, Timeframe::OneDay);
        assert_eq!(config.lookback_days, 30);
        assert_eq!(config.indicators_file, Some(PathBuf::from("presets.toml")));
        assert!(!config.parallel);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = Config::from_lookup(lookup_from(&[("CHART_TIMEFRAME", "15m")])).unwrap_err();
        assert!(err.to_string().contains("CHART_TIMEFRAME"));

        let err = Config::from_lookup(lookup_from(&[("CHART_LOOKBACK_DAYS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("CHART_LOOKBACK_DAYS"));

        assert!(Config::from_lookup(lookup_from(&[("CHART_LOOKBACK_DAYS", "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("CHART_PARALLEL", "maybe")])).is_err());
    }

    #[test]
    fn test_blank_presets_path_is_ignored() {
        let config = Config::from_lookup(lookup_from(&[("CHART_INDICATORS_FILE", "  ")])).unwrap();
        assert!(config.indicators_file.is_none());
    }
}
