// Measurement events. Wire names (upMb/downMb) match the bandwidth table columns.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One bandwidth measurement row: epoch-seconds timestamp, latency, throughput, server.
/// Written once by the collector, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandwidthEvent {
    pub test_time: i64,
    pub ping: f64,
    #[serde(rename = "upMb")]
    pub up_mb: f64,
    #[serde(rename = "downMb")]
    pub down_mb: f64,
    pub host: String,
}

/// A raw event with `test_time` resolved to a local instant (the all/week views).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub test_time: DateTime<Local>,
    pub ping: f64,
    #[serde(rename = "upMb")]
    pub up_mb: f64,
    #[serde(rename = "downMb")]
    pub down_mb: f64,
    pub host: String,
}

impl From<BandwidthEvent> for TimedEvent {
    fn from(event: BandwidthEvent) -> Self {
        TimedEvent {
            test_time: local_instant(event.test_time),
            ping: event.ping,
            up_mb: event.up_mb,
            down_mb: event.down_mb,
            host: event.host,
        }
    }
}

/// Probe output, not yet stamped with a timestamp. Throughput in Mbit/s.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSample {
    pub ping: f64,
    pub up_mb: f64,
    pub down_mb: f64,
    pub host: String,
}

/// Epoch seconds to a local instant. Out-of-range timestamps clamp to the epoch.
pub fn local_instant(epoch_secs: i64) -> DateTime<Local> {
    DateTime::from_timestamp(epoch_secs, 0)
        .unwrap_or_default()
        .with_timezone(&Local)
}
