// Report assembly: bucket windows + per-bucket reductions, one store query per bucket.
// Pure bucketing/aggregation logic lives in the bucket and point submodules.

pub mod bucket;
pub mod point;

use crate::bandwidth_repo::BandwidthRepo;
use crate::models::{BandwidthEvent, BucketReport, TimedEvent};
use bucket::Bucket;
use chrono::{DateTime, Local};
use tracing::instrument;

/// Number of day buckets in the month view.
pub const MONTH_VIEW_DAYS: u32 = 31;

/// Number of month buckets in the year view.
pub const YEAR_VIEW_MONTHS: u32 = 12;

/// Every recorded event, raw, with timestamps resolved to local instants.
pub async fn all_events(
    repo: &BandwidthRepo,
    now: DateTime<Local>,
) -> anyhow::Result<Vec<TimedEvent>> {
    window_events(repo, &bucket::all_window(now)).await
}

/// The rolling last-7-days window, raw, with timestamps resolved to local instants.
pub async fn week_events(
    repo: &BandwidthRepo,
    now: DateTime<Local>,
) -> anyhow::Result<Vec<TimedEvent>> {
    window_events(repo, &bucket::week_window(now)).await
}

async fn window_events(repo: &BandwidthRepo, window: &Bucket) -> anyhow::Result<Vec<TimedEvent>> {
    let events = repo.fetch_events(window.start_ts, window.end_ts).await?;
    Ok(events.into_iter().map(TimedEvent::from).collect())
}

/// One report per calendar day for the last 31 days, chronological-ascending.
/// Days without measurements still get a (zero-valued) report.
#[instrument(skip(repo), fields(operation = "month_report"))]
pub async fn month_report(
    repo: &BandwidthRepo,
    now: DateTime<Local>,
) -> anyhow::Result<Vec<BucketReport>> {
    bucket_reports(repo, bucket::day_buckets(now, MONTH_VIEW_DAYS)).await
}

/// One report per calendar month for the 12 months preceding the current one,
/// chronological-ascending.
#[instrument(skip(repo), fields(operation = "year_report"))]
pub async fn year_report(
    repo: &BandwidthRepo,
    now: DateTime<Local>,
) -> anyhow::Result<Vec<BucketReport>> {
    bucket_reports(repo, bucket::month_buckets(now, YEAR_VIEW_MONTHS)).await
}

async fn bucket_reports(
    repo: &BandwidthRepo,
    buckets: Vec<Bucket>,
) -> anyhow::Result<Vec<BucketReport>> {
    let mut out = Vec::with_capacity(buckets.len());
    for b in &buckets {
        out.push(bucket_report(repo, b).await?);
    }
    Ok(out)
}

async fn bucket_report(repo: &BandwidthRepo, bucket: &Bucket) -> anyhow::Result<BucketReport> {
    let events = repo.fetch_events(bucket.start_ts, bucket.end_ts).await?;
    Ok(report_from_events(&events, bucket))
}

fn report_from_events(events: &[BandwidthEvent], bucket: &Bucket) -> BucketReport {
    let pings: Vec<f64> = events.iter().map(|e| e.ping).collect();
    let ups: Vec<f64> = events.iter().map(|e| e.up_mb).collect();
    let downs: Vec<f64> = events.iter().map(|e| e.down_mb).collect();
    BucketReport {
        time: bucket.label,
        ping: point::make_point(bucket.label, &pings),
        up_mb: point::make_point(bucket.label, &ups),
        down_mb: point::make_point(bucket.label, &downs),
    }
}
