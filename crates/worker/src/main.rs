//! Subtrack reminder worker
//!
//! Runs the renewal reminder pass on a daily schedule. This is the single
//! place the rule engine is invoked from; clients only display what it
//! records.

mod job;
mod store;

use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
    let pool = subtrack_shared::db::create_pool(&database_url).await?;

    // Default: 06:00 UTC daily
    let cron = std::env::var("REMINDER_CRON").unwrap_or_else(|_| "0 0 6 * * *".to_string());
    info!(cron = %cron, "Starting reminder worker");

    // One pass at startup so a redeploy never skips a day
    if let Err(e) = job::run_reminder_pass(&pool).await {
        error!(error = %e, "Startup reminder pass failed");
    }

    let scheduler = JobScheduler::new().await?;
    let job_pool = pool.clone();
    scheduler
        .add(Job::new_async(cron.as_str(), move |_uuid, _lock| {
            let pool = job_pool.clone();
            Box::pin(async move {
                if let Err(e) = job::run_reminder_pass(&pool).await {
                    error!(error = %e, "Scheduled reminder pass failed");
                }
            })
        })?)
        .await?;
    scheduler.start().await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutting down reminder worker");
    Ok(())
}
