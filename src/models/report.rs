// Report output types: one summary point per metric per bucket.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Aggregate of one metric over one bucket.
/// `y` is the display envelope: the wider of mean +/- stdev and the observed
/// min/max. `subvalue.range` is always the observed min/max.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryPoint {
    pub x: DateTime<Local>,
    pub y: [f64; 2],
    pub subvalue: SubValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubValue {
    pub range: [f64; 2],
}

/// One bucket's summaries for all three metrics, labeled with the bucket start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketReport {
    pub time: DateTime<Local>,
    pub ping: SummaryPoint,
    #[serde(rename = "upMb")]
    pub up_mb: SummaryPoint,
    #[serde(rename = "downMb")]
    pub down_mb: SummaryPoint,
}
