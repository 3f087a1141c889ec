use crate::domain::indicators::{IndicatorInstance, IndicatorSeries};
use crate::domain::market::candle::Candle;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

/// Batch indicator runner for a chart's full indicator list
///
/// Every instance is computed independently against the same candle slice, so
/// with the `parallel` feature enabled the list is spread over Rayon's thread
/// pool. Output order always matches input order.
///
/// # Example
///
/// ```no_run
/// use chartcore::application::indicators::IndicatorEngine;
/// use chartcore::domain::indicators::{IndicatorInstance, IndicatorKind};
///
/// # fn example(candles: Vec<chartcore::domain::market::candle::Candle>) {
/// let engine = IndicatorEngine::new(true);
/// let instances = vec![
///     IndicatorInstance::new("sma-20", IndicatorKind::Sma, IndicatorKind::Sma.default_params()),
///     IndicatorInstance::new("rsi-14", IndicatorKind::Rsi, IndicatorKind::Rsi.default_params()),
/// ];
///
/// for series in engine.compute_all(&candles, &instances) {
///     println!("{}: {} points", series.label, series.points.len());
/// }
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IndicatorEngine {
    parallel: bool,
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new(cfg!(feature = "parallel"))
    }
}

impl IndicatorEngine {
    /// Create a new engine
    ///
    /// # Arguments
    ///
    /// * `parallel` - Spread instances over threads. Ignored when the crate is
    ///   built without the `parallel` feature.
    pub fn new(parallel: bool) -> Self {
        Self { parallel }
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel && cfg!(feature = "parallel")
    }

    /// Compute one instance into a labelled series
    pub fn compute(&self, candles: &[Candle], instance: &IndicatorInstance) -> IndicatorSeries {
        let kind = instance.kind;
        let points = kind.compute(candles, &instance.params);
        debug!(
            "Indicator {} ({}): {} points from {} candles",
            instance.id,
            kind,
            points.len(),
            candles.len()
        );

        IndicatorSeries {
            id: instance.id.clone(),
            kind,
            label: kind.label(&instance.params),
            pane: kind.pane(),
            points,
        }
    }

    /// Compute every instance against the same candles
    ///
    /// # Returns
    ///
    /// One series per instance, in the order the instances were given. Instances
    /// without enough data produce a series with no points.
    pub fn compute_all(
        &self,
        candles: &[Candle],
        instances: &[IndicatorInstance],
    ) -> Vec<IndicatorSeries> {
        info!(
            "Computing {} indicators over {} candles (parallel: {})",
            instances.len(),
            candles.len(),
            self.is_parallel()
        );

        #[cfg(feature = "parallel")]
        if self.parallel {
            return instances
                .par_iter()
                .map(|instance| self.compute(candles, instance))
                .collect();
        }

        instances
            .iter()
            .map(|instance| self.compute(candles, instance))
            .collect()
    }
}
