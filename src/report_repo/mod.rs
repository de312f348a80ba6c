// SQLite report storage, one row per (report_id, report_key).
// Uses sqlx for async + connection pooling. report_value is a versioned wincode BLOB (see blob.rs).
//
// Inspecting stored reports: `cargo run --example dump_reports -- [DB_PATH] [LIMIT]`.

mod blob;

use std::future::Future;
use std::path::Path;
use std::str::FromStr;

use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::instrument;

use crate::models::{OverviewReport, ReportKey, StoredReport};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Where finished reports go. The overview pipeline only needs this one call.
pub trait ReportStore {
    fn save_result(
        &self,
        report_id: &str,
        key: ReportKey,
        report: &OverviewReport,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

pub struct ReportRepo {
    pool: SqlitePool,
    retention_ms: i64,
}

impl ReportRepo {
    /// Connect to SQLite at `path`, create parent dir and DB if missing, enable WAL + pragmas.
    pub async fn connect(
        path: &str,
        max_pool_size: u32,
        retention_days: u32,
    ) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_pool_size)
            .connect_with(opts)
            .await?;
        let retention_ms = (retention_days as i64) * MS_PER_DAY;
        Ok(Self { pool, retention_ms })
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS report_result (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                report_id TEXT NOT NULL,
                report_key TEXT NOT NULL,
                report_value BLOB NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_report_result_key ON report_result(report_id, report_key)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_report_result_updated_at ON report_result(updated_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or replace the report stored under (report_id, key).
    #[instrument(skip(self, report), fields(repo = "report", operation = "save_result"))]
    pub async fn save_result_at(
        &self,
        report_id: &str,
        key: ReportKey,
        report: &OverviewReport,
        updated_at: i64,
    ) -> anyhow::Result<()> {
        let value = blob::encode_overview(report)?;
        sqlx::query(
            r#"
            INSERT INTO report_result (report_id, report_key, report_value, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT(report_id, report_key)
            DO UPDATE SET report_value = excluded.report_value, updated_at = excluded.updated_at
            "#,
        )
        .bind(report_id)
        .bind(key.as_str())
        .bind(&value)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    #[instrument(skip(self), fields(repo = "report", operation = "get_result"))]
    pub async fn get_result(
        &self,
        report_id: &str,
        key: ReportKey,
    ) -> anyhow::Result<Option<OverviewReport>> {
        let row = sqlx::query(
            "SELECT report_value FROM report_result WHERE report_id = $1 AND report_key = $2",
        )
        .bind(report_id)
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let value: Vec<u8> = row.try_get("report_value")?;
        Ok(Some(blob::decode_overview(&value)?))
    }

    /// Most recently updated reports first (for inspection/debug).
    pub async fn get_recent_results(&self, limit: u32) -> anyhow::Result<Vec<StoredReport>> {
        let rows = sqlx::query(
            "SELECT report_id, report_key, report_value, updated_at
             FROM report_result ORDER BY updated_at DESC, id DESC LIMIT $1",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let report_id: String = row.try_get("report_id")?;
            let key: String = row.try_get("report_key")?;
            let value: Vec<u8> = row.try_get("report_value")?;
            let updated_at: i64 = row.try_get("updated_at")?;
            let Some(report_key) = ReportKey::parse(&key) else {
                tracing::warn!(report_id = %report_id, report_key = %key, "skipping unknown report key");
                continue;
            };
            out.push(StoredReport {
                report_id,
                report_key,
                updated_at,
                report: blob::decode_overview(&value)?,
            });
        }
        Ok(out)
    }

    /// Delete reports last updated more than retention_days ago.
    #[instrument(skip(self), fields(repo = "report", operation = "prune_old_results"))]
    pub async fn prune_old_results(&self) -> anyhow::Result<u64> {
        let cutoff = now_ms()? - self.retention_ms;
        self.prune_updated_before(cutoff).await
    }

    /// Delete reports with updated_at < cutoff_ts.
    pub async fn prune_updated_before(&self, cutoff_ts: i64) -> anyhow::Result<u64> {
        let r = sqlx::query("DELETE FROM report_result WHERE updated_at < $1")
            .bind(cutoff_ts)
            .execute(&self.pool)
            .await?;
        Ok(r.rows_affected())
    }

    #[instrument(skip(self), fields(repo = "report", operation = "vacuum"))]
    pub async fn vacuum(&self) -> anyhow::Result<()> {
        sqlx::query("VACUUM").execute(&self.pool).await?;
        Ok(())
    }
}

impl ReportStore for ReportRepo {
    async fn save_result(
        &self,
        report_id: &str,
        key: ReportKey,
        report: &OverviewReport,
    ) -> anyhow::Result<()> {
        self.save_result_at(report_id, key, report, now_ms()?).await
    }
}

fn now_ms() -> anyhow::Result<i64> {
    Ok(std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_millis() as i64)
}
