use crate::application::indicators::has_enough;
use crate::application::indicators::smoothing::RollingMean;
use crate::domain::indicators::{IndicatorParams, IndicatorPoint};
use crate::domain::market::candle::Candle;
use ta::Next;

/// Raw volume, one point per candle
pub fn calculate_volume(candles: &[Candle], _params: &IndicatorParams) -> Vec<IndicatorPoint> {
    candles
        .iter()
        .map(|c| IndicatorPoint::new(c.timestamp, c.volume))
        .collect()
}

/// Rolling mean of volume over `params.length` candles
pub fn calculate_volume_ma(candles: &[Candle], params: &IndicatorParams) -> Vec<IndicatorPoint> {
    let length = params.window();
    if !has_enough("VolumeMA", candles.len(), length) {
        return Vec::new();
    }

    let mut mean = RollingMean::new(length);
    candles
        .iter()
        .filter_map(|c| {
            mean.next(c.volume)
                .map(|value| IndicatorPoint::new(c.timestamp, value))
        })
        .collect()
}
