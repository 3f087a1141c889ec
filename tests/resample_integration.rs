use chartcore::application::market_data::resample;
use chartcore::domain::market::candle::Candle;
use chartcore::domain::market::session::session_date;
use chartcore::domain::market::timeframe::{MINUTE_MS, Timeframe};
use chrono::{NaiveDate, TimeZone, Utc};

fn utc_ms(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
        .timestamp_millis()
}

/// Five one-minute bars starting at 09:30 New York on 2024-01-02
fn opening_five_minutes() -> Vec<Candle> {
    let base = utc_ms(2024, 1, 2, 14, 30);
    let ohlcv = [
        (100.0, 101.0, 99.0, 100.5, 10.0),
        (100.5, 102.0, 100.0, 101.0, 11.0),
        (101.0, 103.0, 100.5, 102.0, 12.0),
        (102.0, 102.5, 101.5, 102.2, 13.0),
        (102.2, 103.2, 101.8, 102.8, 14.0),
    ];
    ohlcv
        .iter()
        .enumerate()
        .map(|(i, &(o, h, l, c, v))| Candle::new(base + i as i64 * MINUTE_MS, o, h, l, c, v))
        .collect()
}

#[test]
fn test_five_minute_bucket_aggregation() {
    let candles = opening_five_minutes();

    let out = resample(&candles, Timeframe::FiveMin);

    assert_eq!(out.len(), 1);
    let bucket = out[0];
    assert_eq!(bucket.timestamp, candles[0].timestamp);
    assert_eq!(bucket.open, 100.0);
    assert_eq!(bucket.high, 103.2);
    assert_eq!(bucket.low, 99.0);
    assert_eq!(bucket.close, 102.8);
    assert_eq!(bucket.volume, 60.0);
}

#[test]
fn test_shuffled_input_gives_same_buckets() {
    let candles = opening_five_minutes();
    let mut shuffled = candles.clone();
    shuffled.swap(0, 4);
    shuffled.swap(1, 3);

    assert_eq!(
        resample(&shuffled, Timeframe::FiveMin),
        resample(&candles, Timeframe::FiveMin)
    );
    // Caller's slice is untouched
    assert_eq!(shuffled[0].close, 102.8);
}

#[test]
fn test_one_minute_is_idempotent() {
    let candles = opening_five_minutes();
    let mut reversed = candles.clone();
    reversed.reverse();

    let once = resample(&reversed, Timeframe::OneMin);
    let twice = resample(&once, Timeframe::OneMin);

    assert_eq!(once, candles);
    assert_eq!(twice, once);
}

#[test]
fn test_two_trading_days_make_two_daily_buckets() {
    // 2024-01-02 and 2024-01-03, both EST (UTC-5)
    let day_one_open = utc_ms(2024, 1, 2, 14, 30);
    let day_two_open = utc_ms(2024, 1, 3, 14, 30);

    let candles = vec![
        // Pre-market, dropped
        Candle::flat(day_one_open - 30 * MINUTE_MS, 50.0, 100.0),
        Candle::new(day_one_open, 100.0, 101.0, 99.5, 100.5, 10.0),
        Candle::new(day_one_open + 60 * MINUTE_MS, 100.5, 104.0, 100.0, 103.0, 20.0),
        // 16:00 close is still in session
        Candle::new(day_one_open + 390 * MINUTE_MS, 103.0, 103.5, 102.0, 102.5, 5.0),
        // After hours, dropped
        Candle::flat(day_one_open + 391 * MINUTE_MS, 999.0, 100.0),
        Candle::new(day_two_open + 15 * MINUTE_MS, 102.0, 102.0, 98.0, 99.0, 7.0),
    ];

    let out = resample(&candles, Timeframe::OneDay);

    assert_eq!(out.len(), 2);

    assert_eq!(out[0].timestamp, day_one_open);
    assert_eq!(out[0].open, 100.0);
    assert_eq!(out[0].high, 104.0);
    assert_eq!(out[0].low, 99.5);
    assert_eq!(out[0].close, 102.5);
    assert_eq!(out[0].volume, 35.0);

    assert_eq!(out[1].timestamp, day_two_open);
    assert_eq!(out[1].volume, 7.0);
    assert_eq!(
        session_date(out[1].timestamp),
        NaiveDate::from_ymd_opt(2024, 1, 3)
    );
}

#[test]
fn test_every_timeframe_preserves_volume_for_session_data() {
    // One full regular session of flat bars
    let open = utc_ms(2024, 1, 2, 14, 30);
    let candles: Vec<Candle> = (0..390)
        .map(|i| Candle::flat(open + i * MINUTE_MS, 100.0 + i as f64 * 0.01, 1.0))
        .collect();

    for &timeframe in Timeframe::all() {
        let out = resample(&candles, timeframe);
        let total: f64 = out.iter().map(|c| c.volume).sum();
        assert_eq!(total, 390.0, "volume lost at {}", timeframe);
        assert!(
            out.windows(2).all(|w| w[0].timestamp < w[1].timestamp),
            "buckets out of order at {}",
            timeframe
        );
    }

    assert_eq!(resample(&candles, Timeframe::ThirtyMin).len(), 13);
    assert_eq!(resample(&candles, Timeframe::OneDay).len(), 1);
}

#[test]
fn test_empty_input_for_every_timeframe() {
    for &timeframe in Timeframe::all() {
        assert!(resample(&[], timeframe).is_empty());
    }
}
