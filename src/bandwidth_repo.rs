// SQLite bandwidth store (same schema as the cron collector).
// Uses sqlx for async + connection pooling. One row per measurement, indexed by test_time.

use crate::models::BandwidthEvent;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

pub struct BandwidthRepo {
    pool: SqlitePool,
}

impl BandwidthRepo {
    /// Connect to SQLite at `path`, create parent dir and DB if missing, enable WAL + pragmas.
    pub async fn connect(path: &str) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new().connect_with(opts).await?;
        Ok(Self { pool })
    }

    /// Create the bandwidth table and index if they don't exist.
    pub async fn init(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bandwidth (
                test_time INTEGER NOT NULL,
                ping REAL NOT NULL,
                upMb REAL NOT NULL,
                downMb REAL NOT NULL,
                host TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_bandwidth_test_time ON bandwidth(test_time)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    #[instrument(skip(self, event), fields(repo = "bandwidth", operation = "insert_event"))]
    pub async fn insert_event(&self, event: &BandwidthEvent) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO bandwidth (test_time, ping, upMb, downMb, host) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(event.test_time)
        .bind(event.ping)
        .bind(event.up_mb)
        .bind(event.down_mb)
        .bind(&event.host)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Events with test_time in [start_ts, end_ts], both bounds inclusive, ascending.
    /// An empty range is an empty Vec, never an error.
    #[instrument(skip(self), fields(repo = "bandwidth", operation = "fetch_events"))]
    pub async fn fetch_events(
        &self,
        start_ts: i64,
        end_ts: i64,
    ) -> anyhow::Result<Vec<BandwidthEvent>> {
        let rows = sqlx::query(
            "SELECT test_time, ping, upMb, downMb, host FROM bandwidth
             WHERE test_time >= $1 AND test_time <= $2 ORDER BY test_time ASC",
        )
        .bind(start_ts)
        .bind(end_ts)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(Self::parse_event_row(&row)?);
        }
        Ok(out)
    }

    fn parse_event_row(row: &sqlx::sqlite::SqliteRow) -> anyhow::Result<BandwidthEvent> {
        Ok(BandwidthEvent {
            test_time: row.try_get("test_time")?,
            ping: row.try_get("ping")?,
            up_mb: row.try_get("upMb")?,
            down_mb: row.try_get("downMb")?,
            host: row.try_get("host")?,
        })
    }
}
