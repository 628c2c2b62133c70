// Shared test helpers

use speedmonitor::bandwidth_repo::BandwidthRepo;
use speedmonitor::models::BandwidthEvent;
use tempfile::TempDir;

pub fn event(test_time: i64, ping: f64, up_mb: f64, down_mb: f64) -> BandwidthEvent {
    BandwidthEvent {
        test_time,
        ping,
        up_mb,
        down_mb,
        host: "speedtest.example.net:8080".into(),
    }
}

/// Fresh repo on a throwaway SQLite file. Keep the TempDir alive for the test's duration.
pub async fn temp_repo() -> (TempDir, BandwidthRepo) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bandwidth.db");
    let repo = BandwidthRepo::connect(path.to_str().unwrap()).await.unwrap();
    repo.init().await.unwrap();
    (dir, repo)
}
