// Bucketing: turn a reference instant into ordered report windows.
// Day and month buckets align to the local calendar; week and all-time are rolling.
// Buckets carry inclusive store-query bounds (the table stores integer seconds).

use chrono::{DateTime, Datelike, Days, Duration, Local, LocalResult, Months, NaiveDate, NaiveTime, TimeZone};

/// One report window: inclusive [start_ts, end_ts] query bounds plus the label instant
/// (bucket start, normalized to local midnight / month start for calendar buckets).
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub start_ts: i64,
    pub end_ts: i64,
    pub label: DateTime<Local>,
}

/// The `count` calendar-day buckets ending with the day containing `now`,
/// chronological-ascending.
pub fn day_buckets(now: DateTime<Local>, count: u32) -> Vec<Bucket> {
    let mut out = Vec::with_capacity(count as usize);
    for i in (0..count).rev() {
        out.push(day_bucket(now.date_naive() - Days::new(i as u64)));
    }
    out
}

/// The 24-hour window starting at local midnight of `day`.
pub fn day_bucket(day: NaiveDate) -> Bucket {
    let start = local_midnight(day);
    let end = start + Duration::hours(24);
    Bucket {
        start_ts: start.timestamp(),
        end_ts: end.timestamp() - 1,
        label: start,
    }
}

/// The `count` full calendar-month buckets preceding the month containing `now`,
/// chronological-ascending.
pub fn month_buckets(now: DateTime<Local>, count: u32) -> Vec<Bucket> {
    let first_of_current = first_of_month(now.date_naive());
    let mut out = Vec::with_capacity(count as usize);
    for i in (0..count).rev() {
        out.push(month_bucket(first_of_current - Months::new(i + 1)));
    }
    out
}

/// The full calendar month starting at `first_day` (must be the 1st).
pub fn month_bucket(first_day: NaiveDate) -> Bucket {
    let start = local_midnight(first_day);
    let next = local_midnight(first_day + Months::new(1));
    Bucket {
        start_ts: start.timestamp(),
        end_ts: next.timestamp() - 1,
        label: start,
    }
}

/// Rolling 7-day window ending at `now`. Not calendar-aligned.
pub fn week_window(now: DateTime<Local>) -> Bucket {
    let start = now - Duration::days(7);
    Bucket {
        start_ts: start.timestamp(),
        end_ts: now.timestamp(),
        label: start,
    }
}

/// Everything ever recorded: [0, now].
pub fn all_window(now: DateTime<Local>) -> Bucket {
    Bucket {
        start_ts: 0,
        end_ts: now.timestamp(),
        label: crate::models::local_instant(0),
    }
}

/// First day of the calendar month containing `day`.
fn first_of_month(day: NaiveDate) -> NaiveDate {
    day - Days::new(day.day0() as u64)
}

/// Local midnight for `day`. When a DST jump skips midnight, the earliest
/// valid instant of that day is used instead.
fn local_midnight(day: NaiveDate) -> DateTime<Local> {
    let naive = day.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => Local
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .unwrap_or_default(),
    }
}
