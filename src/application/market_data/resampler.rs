use crate::domain::market::bucket::CandleBucket;
use crate::domain::market::candle::{Candle, sorted_by_time};
use crate::domain::market::session::{is_regular_session_minute, session_start_ms};
use crate::domain::market::timeframe::{MINUTE_MS, Timeframe};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::debug;

const DAY_MS: i64 = 24 * 60 * MINUTE_MS;

/// Resamples candles into `timeframe` buckets.
///
/// The input is copied and stably sorted by timestamp first; the caller's slice is
/// never reordered. `1m` returns that sorted copy unchanged. Intraday timeframes
/// bucket on Unix-epoch multiples of their width. `1d` keeps only regular-session
/// minutes (09:30–16:00 New York, inclusive) and keys each bucket on the 09:30
/// instant of its New York date.
///
/// Within a bucket: first open, highest high, lowest low, last close, summed volume.
/// Only buckets that received at least one candle are returned, in time order.
pub fn resample(candles: &[Candle], timeframe: Timeframe) -> Vec<Candle> {
    let sorted = sorted_by_time(candles);

    if timeframe == Timeframe::OneMin {
        return sorted;
    }

    let resampled = match timeframe {
        Timeframe::OneDay => {
            let in_session: Vec<&Candle> = sorted
                .iter()
                .filter(|c| is_regular_session_minute(c.timestamp))
                .collect();
            let dropped = sorted.len() - in_session.len();
            if dropped > 0 {
                debug!("Resampler: dropped {} off-session candles for 1d", dropped);
            }
            aggregate(in_session, session_start_ms)
        }
        _ => aggregate(&sorted, |ts| timeframe.period_start(ts)),
    };

    debug!(
        "Resampler: {} candles -> {} {} buckets",
        candles.len(),
        resampled.len(),
        timeframe
    );

    resampled
}

/// Keeps the candles within `lookback_days` of the latest timestamp, in input order
pub fn trim_to_lookback(candles: &[Candle], lookback_days: i64) -> Vec<Candle> {
    let Some(latest) = candles.iter().map(|c| c.timestamp).max() else {
        return Vec::new();
    };
    let cutoff = latest.saturating_sub(lookback_days.saturating_mul(DAY_MS));
    let kept: Vec<Candle> = candles
        .iter()
        .filter(|c| c.timestamp >= cutoff)
        .copied()
        .collect();
    if kept.len() < candles.len() {
        debug!(
            "Resampler: lookback of {} days dropped {} candles",
            lookback_days,
            candles.len() - kept.len()
        );
    }
    kept
}

/// One pass over time-ordered candles, merging each into the bucket named by `bucket_key`.
/// Candles for which no key can be computed are skipped.
fn aggregate<'a, I, F>(candles: I, bucket_key: F) -> Vec<Candle>
where
    I: IntoIterator<Item = &'a Candle>,
    F: Fn(i64) -> Option<i64>,
{
    let mut buckets: BTreeMap<i64, CandleBucket> = BTreeMap::new();

    for candle in candles {
        let Some(key) = bucket_key(candle.timestamp) else {
            continue;
        };
        match buckets.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(CandleBucket::new(key, candle));
            }
            Entry::Occupied(mut slot) => slot.get_mut().update(candle),
        }
    }

    buckets.values().map(CandleBucket::to_candle).collect()
}
