//! Daily reminder pass
//!
//! Loads the day's inputs, runs the pure evaluation pass, and records the
//! survivors. Per-item failures are logged and counted; the pass itself
//! only fails on infrastructure errors (store unreachable).

use sqlx::PgPool;
use subtrack_reminders::run_pass;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::store;

/// Summary of one completed pass
#[derive(Debug, Default)]
pub struct PassStats {
    pub evaluated: usize,
    pub emitted: usize,
    /// Survivors a concurrent pass recorded first
    pub lost_races: usize,
    pub item_errors: usize,
}

/// Run one evaluation pass over every active subscription
pub async fn run_reminder_pass(pool: &PgPool) -> anyhow::Result<PassStats> {
    let today = OffsetDateTime::now_utc().date();

    let subscriptions = store::fetch_active_subscriptions(pool).await?;
    let directory = store::load_owner_directory(pool).await?;
    let history = store::load_today_history(pool, today).await?;

    let outcome = run_pass(&subscriptions, &directory, &history, today);

    let mut stats = PassStats {
        evaluated: subscriptions.len(),
        item_errors: outcome.errors.len(),
        ..PassStats::default()
    };

    for error in &outcome.errors {
        warn!(error = %error, "Reminder pass item error");
    }

    for event in &outcome.events {
        if store::record_notification(pool, event, today).await? {
            info!(
                subscription_id = %event.subscription_id,
                owner_id = %event.owner_id,
                window = %event.window,
                day_offset = event.day_offset,
                "Reminder recorded"
            );
            stats.emitted += 1;
        } else {
            // A concurrent pass won the insert; skip delivery
            stats.lost_races += 1;
        }
    }

    info!(
        evaluated = stats.evaluated,
        emitted = stats.emitted,
        lost_races = stats.lost_races,
        item_errors = stats.item_errors,
        "Reminder pass complete"
    );

    Ok(stats)
}
