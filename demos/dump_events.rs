// Dump recent bandwidth rows as JSON.
//
// Usage: cargo run --example dump_events -- [DB_PATH] [LIMIT]
//   DB_PATH  default: ./data/bandwidth.db
//   LIMIT    default: 10

use speedmonitor::bandwidth_repo::BandwidthRepo;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let path = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("./data/bandwidth.db");
    let limit: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10);

    let repo = BandwidthRepo::connect(path).await?;
    let now = chrono::Local::now().timestamp();
    let events = repo.fetch_events(0, now).await?;
    let recent = &events[events.len().saturating_sub(limit)..];

    println!("{}", serde_json::to_string_pretty(recent)?);
    Ok(())
}
