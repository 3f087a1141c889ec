// Indicator value types shared by the engine and its callers
pub mod kind;
pub mod params;
pub mod point;

pub use kind::{IndicatorInstance, IndicatorKind, IndicatorPane};
pub use params::{IndicatorParams, MacdLengths, ParamOverrides, PriceSource};
pub use point::{IndicatorPoint, IndicatorSeries};
