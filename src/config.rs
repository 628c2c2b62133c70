use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub testing: TestingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestingConfig {
    /// Speedtest CLI binary invoked by the collector (must support `--json`).
    pub command: String,
    /// Preferred speedtest server id; best server is used when unset.
    #[serde(default)]
    pub server_id: Option<String>,
    /// Optional cron expression for measurement runs (e.g. "0 */30 * * * *"). Uses local time.
    #[serde(default)]
    pub schedule: Option<String>,
    /// Run a measurement every N seconds when schedule is not set.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_interval_secs() -> u64 {
    3600
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        anyhow::ensure!(
            !self.testing.command.is_empty(),
            "testing.command must be non-empty"
        );
        anyhow::ensure!(
            self.testing.interval_secs > 0,
            "testing.interval_secs must be > 0, got {}",
            self.testing.interval_secs
        );
        Ok(())
    }
}
