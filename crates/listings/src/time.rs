//! Relative times and auto-archiving.

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Human-readable age of `then` as seen at `now`, e.g. "3 days ago".
///
/// Months are 30 days and years 365 days. Anything under a minute, or in the
/// future, is "just now".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();

    for (unit, name) in [(YEAR, "year"), (MONTH, "month"), (DAY, "day"), (HOUR, "hour"), (MINUTE, "minute")] {
        let n = seconds / unit;
        if n >= 1 {
            return if n == 1 {
                format!("1 {name} ago")
            } else {
                format!("{n} {name}s ago")
            };
        }
    }

    "just now".to_string()
}

/// True once more than `days` whole or partial days separate `created` and `now`.
pub fn should_auto_archive(created: DateTime<Utc>, now: DateTime<Utc>, days: u32) -> bool {
    const DAY_MS: i64 = DAY * 1000;
    let elapsed_ms = (now - created).num_milliseconds().abs();
    let elapsed_days = (elapsed_ms + DAY_MS - 1) / DAY_MS;
    elapsed_days > i64::from(days)
}
