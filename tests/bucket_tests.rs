// Bucketing tests: calendar alignment, counts, contiguity, rolling windows

use chrono::{Datelike, Local, NaiveDate, NaiveTime, TimeZone, Timelike};
use speedmonitor::report::bucket::{
    all_window, day_bucket, day_buckets, month_bucket, month_buckets, week_window,
};

// Mid-June reference: 31 days back and 12 months back cross no DST transition
// in the common zones, so second arithmetic is stable.
fn fixed_now() -> chrono::DateTime<Local> {
    Local.with_ymd_and_hms(2025, 6, 15, 14, 30, 0).unwrap()
}

#[test]
fn day_buckets_produces_31_contiguous_days_ascending() {
    let buckets = day_buckets(fixed_now(), 31);
    assert_eq!(buckets.len(), 31);

    for b in &buckets {
        // Exactly 24 hours, inclusive second-resolution bounds
        assert_eq!(b.end_ts - b.start_ts + 1, 24 * 3600);
        assert_eq!(b.label.time(), NaiveTime::MIN);
        assert_eq!(b.label.timestamp(), b.start_ts);
    }
    for pair in buckets.windows(2) {
        assert!(pair[0].label < pair[1].label, "ascending order");
        assert_eq!(pair[1].start_ts, pair[0].end_ts + 1, "no gaps or overlaps");
    }
}

#[test]
fn day_buckets_last_bucket_contains_now() {
    let now = fixed_now();
    let buckets = day_buckets(now, 31);
    let last = buckets.last().unwrap();
    assert!(last.start_ts <= now.timestamp());
    assert!(now.timestamp() <= last.end_ts);
    assert_eq!(last.label.date_naive(), now.date_naive());
}

#[test]
fn day_bucket_starts_at_local_midnight() {
    let b = day_bucket(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
    assert_eq!(b.label.hour(), 0);
    assert_eq!(b.label.minute(), 0);
    assert_eq!(b.label.second(), 0);
    assert_eq!(b.label.date_naive(), NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
}

#[test]
fn month_buckets_covers_the_12_months_preceding_current() {
    let buckets = month_buckets(fixed_now(), 12);
    assert_eq!(buckets.len(), 12);

    let first = buckets.first().unwrap();
    assert_eq!(first.label.date_naive(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    let last = buckets.last().unwrap();
    assert_eq!(last.label.date_naive(), NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());

    // Last bucket ends exactly one second before the current month starts
    let current_month_start = Local.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    assert_eq!(last.end_ts, current_month_start.timestamp() - 1);

    for b in &buckets {
        assert_eq!(b.label.day(), 1);
        assert_eq!(b.label.time(), NaiveTime::MIN);
    }
    for pair in buckets.windows(2) {
        assert_eq!(pair[1].start_ts, pair[0].end_ts + 1, "non-overlapping, contiguous");
    }
}

#[test]
fn month_bucket_spans_the_full_calendar_month() {
    let feb = month_bucket(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    assert_eq!(feb.end_ts - feb.start_ts + 1, 28 * 24 * 3600);

    let march_start = Local.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    assert_eq!(feb.end_ts, march_start.timestamp() - 1);
}

#[test]
fn week_window_is_rolling_not_calendar_aligned() {
    let now = fixed_now();
    let w = week_window(now);
    assert_eq!(w.end_ts - w.start_ts, 7 * 24 * 3600);
    assert_eq!(w.end_ts, now.timestamp());
    // 14:30 start: follows now, not midnight
    assert_eq!(w.label.hour(), 14);
}

#[test]
fn all_window_is_unbounded_below() {
    let now = fixed_now();
    let w = all_window(now);
    assert_eq!(w.start_ts, 0);
    assert_eq!(w.end_ts, now.timestamp());
}
