// Speedtest probe via an external CLI (`speedtest-cli --json` compatible output).
// The report engine never touches this module; the collector worker takes the
// probe as an injected capability so tests can substitute a fake.

use crate::models::MeasurementSample;
use serde::Deserialize;
use std::process::ExitStatus;
use thiserror::Error;
use tokio::process::Command;

/// The CLI reports bits/s; the store keeps Mbit/s (1 Mbit = 1024*1024 bits,
/// matching the collector that originally populated the table).
const BITS_PER_MEGABIT: f64 = 1024.0 * 1024.0;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to run speedtest command: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("speedtest command exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("speedtest output parse: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A source of bandwidth measurements.
pub trait SpeedtestProbe: Send + Sync {
    fn run_measurement(
        &self,
    ) -> impl Future<Output = Result<MeasurementSample, ProbeError>> + Send;
}

/// Runs the configured speedtest binary and parses its JSON report.
pub struct CliProbe {
    command: String,
    server_id: Option<String>,
}

impl CliProbe {
    pub fn new(command: String, server_id: Option<String>) -> Self {
        Self { command, server_id }
    }
}

impl SpeedtestProbe for CliProbe {
    async fn run_measurement(&self) -> Result<MeasurementSample, ProbeError> {
        let mut cmd = Command::new(&self.command);
        cmd.arg("--json");
        if let Some(id) = &self.server_id {
            cmd.arg("--server").arg(id);
        }
        let output = cmd.output().await?;
        if !output.status.success() {
            return Err(ProbeError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        let report: CliReport = serde_json::from_slice(&output.stdout)?;
        Ok(report.into_sample())
    }
}

/// The fields we read from `speedtest-cli --json` output.
#[derive(Debug, Deserialize)]
struct CliReport {
    ping: f64,
    /// bits/s
    download: f64,
    /// bits/s
    upload: f64,
    server: CliServer,
}

#[derive(Debug, Deserialize)]
struct CliServer {
    host: String,
}

impl CliReport {
    fn into_sample(self) -> MeasurementSample {
        MeasurementSample {
            ping: self.ping,
            up_mb: self.upload / BITS_PER_MEGABIT,
            down_mb: self.download / BITS_PER_MEGABIT,
            host: self.server.host,
        }
    }
}
