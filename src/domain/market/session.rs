//! Regular trading session of the New York exchanges.
//!
//! The session runs 09:30 to 16:00 inclusive, America/New_York local time,
//! on every calendar date. Holidays and half days are not modelled.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::America::New_York;
use chrono_tz::Tz;

pub const SESSION_OPEN: (u32, u32) = (9, 30);
pub const SESSION_CLOSE: (u32, u32) = (16, 0);

fn to_new_york(timestamp_ms: i64) -> Option<DateTime<Tz>> {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|utc| utc.with_timezone(&New_York))
}

/// Returns true when the minute containing `timestamp_ms` lies inside the
/// regular session. Seconds are ignored, so 16:00:59 still counts.
pub fn is_regular_session_minute(timestamp_ms: i64) -> bool {
    let Some(local) = to_new_york(timestamp_ms) else {
        return false;
    };
    let minute_of_day = local.hour() * 60 + local.minute();
    let open = SESSION_OPEN.0 * 60 + SESSION_OPEN.1;
    let close = SESSION_CLOSE.0 * 60 + SESSION_CLOSE.1;
    (open..=close).contains(&minute_of_day)
}

/// New York calendar date of `timestamp_ms`
pub fn session_date(timestamp_ms: i64) -> Option<NaiveDate> {
    to_new_york(timestamp_ms).map(|local| local.date_naive())
}

/// Instant (ms) of 09:30 New York time on the given calendar date
pub fn session_open_on(date: NaiveDate) -> Option<i64> {
    let open = NaiveTime::from_hms_opt(SESSION_OPEN.0, SESSION_OPEN.1, 0)?;
    New_York
        .from_local_datetime(&date.and_time(open))
        .single()
        .map(|dt| dt.timestamp_millis())
}

/// Instant (ms) of 09:30 New York time on the New York date of `timestamp_ms`
pub fn session_start_ms(timestamp_ms: i64) -> Option<i64> {
    session_open_on(session_date(timestamp_ms)?)
}
