// Background collector: run the speedtest probe on a schedule and append one
// row per run. Measurement runs follow a cron expression (local time) or a
// fixed interval; a failed probe run is logged and the next tick retries.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::bandwidth_repo::BandwidthRepo;
use crate::models::BandwidthEvent;
use crate::speedtest_repo::SpeedtestProbe;
use tracing::{info, instrument, warn};

/// Probe, store, and shutdown for the collector.
pub struct CollectorDeps<P> {
    pub probe: Arc<P>,
    pub repo: Arc<BandwidthRepo>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

/// Collector timing config.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Optional cron expression for measurement runs (e.g. "0 */30 * * * *"). Uses local time.
    pub schedule: Option<String>,
    /// Run a measurement every N seconds when schedule is not set.
    pub interval_secs: u64,
}

/// Spawns the collector. Returns a join handle.
pub fn spawn<P: SpeedtestProbe + 'static>(
    deps: CollectorDeps<P>,
    config: CollectorConfig,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        run(deps, config).await;
    })
}

#[instrument(skip(deps, config), fields(interval_secs = config.interval_secs))]
async fn run<P: SpeedtestProbe + 'static>(deps: CollectorDeps<P>, config: CollectorConfig) {
    let CollectorDeps {
        probe,
        repo,
        mut shutdown_rx,
    } = deps;

    let (tick_tx, mut tick_rx) = tokio::sync::mpsc::channel::<()>(1);
    tokio::spawn(schedule_ticks(config, tick_tx));

    loop {
        tokio::select! {
            tick = tick_rx.recv() => {
                match tick {
                    Some(()) => {
                        if let Err(e) = run_one_measurement(probe.as_ref(), &repo).await {
                            warn!(error = %e, "measurement run failed");
                        }
                    }
                    None => break,
                }
            }
            _ = &mut shutdown_rx => {
                tracing::debug!("Collector shutting down");
                break;
            }
        }
    }
}

/// Sends a message on `tx` at each measurement time (cron or fixed interval).
/// Uses local time for cron; an invalid expression falls back to the interval.
async fn schedule_ticks(config: CollectorConfig, tx: tokio::sync::mpsc::Sender<()>) {
    if let Some(ref cron_str) = config.schedule {
        match cron::Schedule::from_str(cron_str) {
            Ok(schedule) => {
                loop {
                    let now = chrono::Local::now();
                    let Some(next) = schedule.after(&now).next() else {
                        tokio::time::sleep(Duration::from_secs(3600)).await;
                        continue;
                    };
                    let delay = (next - now).to_std().unwrap_or(Duration::from_secs(1));
                    tokio::time::sleep(delay).await;
                    if tx.send(()).await.is_err() {
                        break;
                    }
                }
                return;
            }
            Err(e) => {
                warn!(cron = %cron_str, error = %e, "invalid testing.schedule; using interval_secs");
            }
        }
    }
    let interval = Duration::from_secs(config.interval_secs);
    loop {
        tokio::time::sleep(interval).await;
        if tx.send(()).await.is_err() {
            break;
        }
    }
}

/// One measurement pass: probe, stamp test_time, insert.
pub async fn run_one_measurement<P: SpeedtestProbe>(
    probe: &P,
    repo: &BandwidthRepo,
) -> anyhow::Result<()> {
    let sample = probe.run_measurement().await?;
    let test_time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs() as i64;
    let event = BandwidthEvent {
        test_time,
        ping: sample.ping,
        up_mb: sample.up_mb,
        down_mb: sample.down_mb,
        host: sample.host,
    };
    repo.insert_event(&event).await?;
    info!(
        ping_ms = event.ping,
        up_mb = event.up_mb,
        down_mb = event.down_mb,
        host = %event.host,
        "measurement stored"
    );
    Ok(())
}
