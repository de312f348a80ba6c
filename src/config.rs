use std::str::FromStr;

use serde::Deserialize;

use crate::format::{MAX_FRACTION_DIGITS, NumberFormat};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    /// Display format for throughput, error rate and bandwidth.
    #[serde(default)]
    pub format: NumberFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_pool_size: u32,
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    #[serde(default = "default_prune_interval_secs")]
    pub prune_interval_secs: u64,
    /// Optional cron expression for VACUUM (e.g. "0 0 3 * * *"). Uses local time.
    #[serde(default)]
    pub vacuum_schedule: Option<String>,
    /// Run VACUUM every N seconds when vacuum_schedule is not set.
    #[serde(default = "default_vacuum_interval_secs")]
    pub vacuum_interval_secs: u64,
}

fn default_retention_days() -> u32 {
    30
}

fn default_prune_interval_secs() -> u64 {
    3600
}

fn default_vacuum_interval_secs() -> u64 {
    86_400
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
            self.database.max_pool_size > 0,
            "database.max_pool_size must be > 0, got {}",
            self.database.max_pool_size
        );
        anyhow::ensure!(
            self.database.retention_days > 0,
            "database.retention_days must be > 0, got {}",
            self.database.retention_days
        );
        anyhow::ensure!(
            self.database.prune_interval_secs > 0,
            "database.prune_interval_secs must be > 0, got {}",
            self.database.prune_interval_secs
        );
        anyhow::ensure!(
            self.database.vacuum_interval_secs > 0,
            "database.vacuum_interval_secs must be > 0, got {}",
            self.database.vacuum_interval_secs
        );
        if let Some(ref schedule) = self.database.vacuum_schedule {
            cron::Schedule::from_str(schedule).map_err(|e| {
                anyhow::anyhow!("database.vacuum_schedule `{}` is invalid: {}", schedule, e)
            })?;
        }
        anyhow::ensure!(
            self.format.fraction_digits <= MAX_FRACTION_DIGITS,
            "format.fraction_digits must be <= {}, got {}",
            MAX_FRACTION_DIGITS,
            self.format.fraction_digits
        );
        Ok(())
    }
}
