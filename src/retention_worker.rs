// Background worker: prune reports past retention, VACUUM on a schedule.
// VACUUM runs on a cron expression (local time) or a fixed interval.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, info, instrument, warn};

use crate::config::DatabaseConfig;
use crate::report_repo::ReportRepo;

#[derive(Debug, Clone)]
pub struct RetentionWorkerConfig {
    pub prune_interval_secs: u64,
    pub vacuum_schedule: Option<String>,
    pub vacuum_interval_secs: u64,
}

impl From<&DatabaseConfig> for RetentionWorkerConfig {
    fn from(db: &DatabaseConfig) -> Self {
        Self {
            prune_interval_secs: db.prune_interval_secs,
            vacuum_schedule: db.vacuum_schedule.clone(),
            vacuum_interval_secs: db.vacuum_interval_secs,
        }
    }
}

/// Spawns the retention worker. It exits when `shutdown_rx` fires or its sender is dropped.
pub fn spawn(
    repo: Arc<ReportRepo>,
    config: RetentionWorkerConfig,
    shutdown_rx: oneshot::Receiver<()>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        run(repo, config, shutdown_rx).await;
    })
}

#[instrument(skip(repo, shutdown_rx), fields(prune_interval_secs = config.prune_interval_secs))]
async fn run(
    repo: Arc<ReportRepo>,
    config: RetentionWorkerConfig,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let mut prune_interval = tokio::time::interval(Duration::from_secs(config.prune_interval_secs));
    prune_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let (vacuum_tx, mut vacuum_rx) = tokio::sync::mpsc::channel::<()>(1);
    let scheduler = tokio::spawn(vacuum_scheduler(config.clone(), vacuum_tx));

    loop {
        tokio::select! {
            _ = prune_interval.tick() => {
                if let Err(e) = run_one_tick(&repo).await {
                    warn!(error = %e, "report prune failed");
                }
            }
            Some(()) = vacuum_rx.recv() => {
                if let Err(e) = repo.vacuum().await {
                    warn!(error = %e, "vacuum failed");
                } else {
                    info!("vacuum complete");
                }
            }
            _ = &mut shutdown_rx => {
                break;
            }
        }
    }
    scheduler.abort();
    debug!("retention worker shutting down");
}

/// Sends a message on `tx` at each VACUUM time (cron or fixed interval). Uses local time for cron.
async fn vacuum_scheduler(config: RetentionWorkerConfig, tx: tokio::sync::mpsc::Sender<()>) {
    if let Some(ref cron_str) = config.vacuum_schedule {
        let Ok(schedule) = cron::Schedule::from_str(cron_str) else {
            warn!(cron = %cron_str, "invalid vacuum_schedule; VACUUM will not run");
            return;
        };
        loop {
            let now = chrono::Local::now();
            if let Some(next) = schedule.after(&now).next() {
                let delay = (next - now).to_std().unwrap_or(Duration::from_secs(1));
                tokio::time::sleep(delay).await;
                if tx.send(()).await.is_err() {
                    break;
                }
            } else {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
        }
    } else {
        let interval = Duration::from_secs(config.vacuum_interval_secs);
        loop {
            tokio::time::sleep(interval).await;
            if tx.send(()).await.is_err() {
                break;
            }
        }
    }
}

/// One prune pass. Returns the number of reports removed.
pub async fn run_one_tick(repo: &ReportRepo) -> anyhow::Result<u64> {
    let pruned = repo.prune_old_results().await?;
    if pruned > 0 {
        info!(pruned_reports = pruned, "pruned reports past retention");
    }
    Ok(pruned)
}
