use crate::application::indicators::{
    calculate_anchored_vwap, calculate_atr, calculate_bollinger, calculate_ema, calculate_macd,
    calculate_macd_histogram, calculate_macd_signal, calculate_rsi, calculate_sma,
    calculate_volume, calculate_volume_ma,
};
use crate::domain::indicators::params::{
    DEFAULT_MACD_FAST, DEFAULT_MACD_SIGNAL, DEFAULT_MACD_SLOW, DEFAULT_STD_DEV,
};
use crate::domain::indicators::{IndicatorKind, IndicatorPane, IndicatorParams, IndicatorPoint};
use crate::domain::market::candle::Candle;
use serde::Serialize;
use std::sync::OnceLock;

pub type IndicatorCompute = fn(&[Candle], &IndicatorParams) -> Vec<IndicatorPoint>;

/// Static metadata for one indicator kind
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorDefinition {
    #[serde(rename = "type")]
    pub kind: IndicatorKind,
    pub name: &'static str,
    pub pane: IndicatorPane,
    pub default_params: IndicatorParams,
    /// Named output lines, for kinds that draw more than `value`
    pub lines: &'static [&'static str],
}

impl IndicatorDefinition {
    pub fn label(&self, params: &IndicatorParams) -> String {
        self.kind.label(params)
    }

    pub fn compute(&self, candles: &[Candle], params: &IndicatorParams) -> Vec<IndicatorPoint> {
        self.kind.compute(candles, params)
    }
}

static REGISTRY: OnceLock<Vec<IndicatorDefinition>> = OnceLock::new();

/// Every indicator definition, in [`IndicatorKind::ALL`] order
pub fn indicator_registry() -> &'static [IndicatorDefinition] {
    REGISTRY.get_or_init(|| {
        IndicatorKind::ALL
            .into_iter()
            .map(IndicatorKind::build_definition)
            .collect()
    })
}

fn macd_defaults() -> IndicatorParams {
    IndicatorParams::new(12).with_macd(DEFAULT_MACD_FAST, DEFAULT_MACD_SLOW, DEFAULT_MACD_SIGNAL)
}

const NO_LINES: &[&str] = &[];
const BAND_LINES: &[&str] = &["upper", "lower", "value"];

impl IndicatorKind {
    fn build_definition(self) -> IndicatorDefinition {
        let (name, pane, default_params, lines) = match self {
            IndicatorKind::Sma => ("SMA", IndicatorPane::Overlay, IndicatorParams::new(20), NO_LINES),
            IndicatorKind::Ema => ("EMA", IndicatorPane::Overlay, IndicatorParams::new(20), NO_LINES),
            IndicatorKind::Rsi => ("RSI", IndicatorPane::Separate, IndicatorParams::new(14), NO_LINES),
            IndicatorKind::Vwap => (
                "Anchored VWAP",
                IndicatorPane::Overlay,
                IndicatorParams::new(1).with_anchor(""),
                NO_LINES,
            ),
            IndicatorKind::Macd => ("MACD Line", IndicatorPane::Separate, macd_defaults(), NO_LINES),
            IndicatorKind::MacdSignal => {
                ("MACD Signal", IndicatorPane::Separate, macd_defaults(), NO_LINES)
            }
            IndicatorKind::MacdHistogram => {
                ("MACD Histogram", IndicatorPane::Separate, macd_defaults(), NO_LINES)
            }
            IndicatorKind::Bollinger => (
                "Bollinger Bands",
                IndicatorPane::Overlay,
                IndicatorParams::new(20).with_std_dev(DEFAULT_STD_DEV),
                BAND_LINES,
            ),
            IndicatorKind::Volume => ("Volume", IndicatorPane::Separate, IndicatorParams::new(1), NO_LINES),
            IndicatorKind::VolumeMa => {
                ("Volume MA", IndicatorPane::Separate, IndicatorParams::new(20), NO_LINES)
            }
            IndicatorKind::Atr => ("ATR", IndicatorPane::Separate, IndicatorParams::new(14), NO_LINES),
        };

        IndicatorDefinition {
            kind: self,
            name,
            pane,
            default_params,
            lines,
        }
    }

    pub fn definition(self) -> &'static IndicatorDefinition {
        // Registry is built from ALL, whose order matches declaration order
        &indicator_registry()[self as usize]
    }

    pub fn default_params(self) -> IndicatorParams {
        self.definition().default_params.clone()
    }

    pub fn pane(self) -> IndicatorPane {
        self.definition().pane
    }

    pub fn compute_fn(self) -> IndicatorCompute {
        match self {
            IndicatorKind::Sma => calculate_sma,
            IndicatorKind::Ema => calculate_ema,
            IndicatorKind::Rsi => calculate_rsi,
            IndicatorKind::Vwap => calculate_anchored_vwap,
            IndicatorKind::Macd => calculate_macd,
            IndicatorKind::MacdSignal => calculate_macd_signal,
            IndicatorKind::MacdHistogram => calculate_macd_histogram,
            IndicatorKind::Bollinger => calculate_bollinger,
            IndicatorKind::Volume => calculate_volume,
            IndicatorKind::VolumeMa => calculate_volume_ma,
            IndicatorKind::Atr => calculate_atr,
        }
    }

    pub fn compute(self, candles: &[Candle], params: &IndicatorParams) -> Vec<IndicatorPoint> {
        (self.compute_fn())(candles, params)
    }

    /// Smallest input length for which `compute` returns at least one point
    pub fn min_candles(self, params: &IndicatorParams) -> usize {
        let length = params.window();
        match self {
            IndicatorKind::Sma
            | IndicatorKind::Ema
            | IndicatorKind::Bollinger
            | IndicatorKind::VolumeMa => length,
            IndicatorKind::Rsi | IndicatorKind::Atr => length.saturating_add(1),
            IndicatorKind::Macd | IndicatorKind::MacdSignal | IndicatorKind::MacdHistogram => {
                let lengths = params.macd_lengths();
                lengths.slow.saturating_add(lengths.signal)
            }
            IndicatorKind::Volume | IndicatorKind::Vwap => 1,
        }
    }

    /// Human-readable legend text
    pub fn label(self, params: &IndicatorParams) -> String {
        let macd = || {
            format!(
                "({},{},{})",
                params.macd_fast.unwrap_or(DEFAULT_MACD_FAST as f64),
                params.macd_slow.unwrap_or(DEFAULT_MACD_SLOW as f64),
                params.macd_signal.unwrap_or(DEFAULT_MACD_SIGNAL as f64)
            )
        };
        match self {
            IndicatorKind::Sma => format!("SMA({}) {}", params.length, params.source),
            IndicatorKind::Ema => format!("EMA({}) {}", params.length, params.source),
            IndicatorKind::Rsi => format!("RSI({}) {}", params.length, params.source),
            IndicatorKind::Vwap => match params.anchor() {
                Some(anchor) => format!("AVWAP {}", anchor.replace('T', " ")),
                None => "AVWAP auto".to_string(),
            },
            IndicatorKind::Macd => format!("MACD{}", macd()),
            IndicatorKind::MacdSignal => format!("Signal{}", macd()),
            IndicatorKind::MacdHistogram => format!("Histogram{}", macd()),
            IndicatorKind::Bollinger => format!(
                "BB({}, {})",
                params.length,
                params.std_dev_multiplier()
            ),
            IndicatorKind::Volume => "Volume".to_string(),
            IndicatorKind::VolumeMa => format!("Vol MA({})", params.length),
            IndicatorKind::Atr => format!("ATR({})", params.length),
        }
    }
}
