//! Store adapters for the reminder pass
//!
//! The engine is pure; everything queryable lives here. Before a pass the
//! worker loads active subscriptions, the owner directory, and the current
//! day's emission log into memory, then runs the synchronous pass over
//! them. Survivors are written back with a uniqueness guard on
//! (subscription, window, day) so racing passes cannot double-record.

use sqlx::{FromRow, PgPool};
use subtrack_reminders::{EmissionKey, InMemoryDirectory, InMemoryHistory, ReminderEvent, ReminderWindow};
use subtrack_shared::{
    BillingCycle, ReminderPreferences, Subscription, SubscriptionId, SubscriptionStatus, UserId,
};
use time::Date;
use uuid::Uuid;

#[derive(FromRow)]
struct SubscriptionRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    cost_cents: i64,
    billing_cycle: BillingCycle,
    // Kept as text: the upstream store serves calendar dates as strings,
    // and the engine owns the parse so bad rows fail item-by-item
    renewal_date: String,
    status: SubscriptionStatus,
}

impl From<SubscriptionRow> for Subscription {
    fn from(row: SubscriptionRow) -> Self {
        Self {
            id: SubscriptionId(row.id),
            owner_id: UserId(row.owner_id),
            name: row.name,
            cost_cents: row.cost_cents,
            billing_cycle: row.billing_cycle,
            renewal_date: row.renewal_date,
            status: row.status,
        }
    }
}

/// Fetch every active subscription
pub async fn fetch_active_subscriptions(pool: &PgPool) -> Result<Vec<Subscription>, sqlx::Error> {
    let rows: Vec<SubscriptionRow> = sqlx::query_as(
        r#"
        SELECT id, owner_id, name, cost_cents, billing_cycle, renewal_date, status
        FROM subscriptions
        WHERE status = 'active'
        ORDER BY renewal_date ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Subscription::from).collect())
}

#[derive(FromRow)]
struct PlanRow {
    user_id: Uuid,
    plan_tier: String,
}

#[derive(FromRow)]
struct PreferencesRow {
    user_id: Uuid,
    thirty_day: bool,
    seven_day: bool,
    one_day: bool,
}

/// Load every owner's tier and preference row into an in-memory directory
///
/// Owners without a row fall back to the engine's defaults, mirroring the
/// settings store's behavior of creating a default row on first use.
pub async fn load_owner_directory(pool: &PgPool) -> Result<InMemoryDirectory, sqlx::Error> {
    let mut directory = InMemoryDirectory::new();

    let plans: Vec<PlanRow> = sqlx::query_as("SELECT user_id, plan_tier FROM user_plans")
        .fetch_all(pool)
        .await?;
    for row in plans {
        match row.plan_tier.parse() {
            Ok(tier) => directory.set_tier(UserId(row.user_id), tier),
            Err(e) => {
                // Unknown tier falls back to free rather than blocking the pass
                tracing::warn!(user_id = %row.user_id, error = %e, "Unknown plan tier, using default");
            }
        }
    }

    let preferences: Vec<PreferencesRow> = sqlx::query_as(
        "SELECT user_id, thirty_day, seven_day, one_day FROM reminder_preferences",
    )
    .fetch_all(pool)
    .await?;
    for row in preferences {
        directory.set_preferences(
            UserId(row.user_id),
            ReminderPreferences {
                thirty_day: row.thirty_day,
                seven_day: row.seven_day,
                one_day: row.one_day,
            },
        );
    }

    Ok(directory)
}

#[derive(FromRow)]
struct EmissionRow {
    subscription_id: Uuid,
    window: String,
    day_offset: i64,
}

/// Hydrate the current day's emission log for duplicate suppression
pub async fn load_today_history(pool: &PgPool, today: Date) -> Result<InMemoryHistory, sqlx::Error> {
    let rows: Vec<EmissionRow> = sqlx::query_as(
        r#"
        SELECT subscription_id, window, day_offset
        FROM notification_log
        WHERE emitted_on = $1
        "#,
    )
    .bind(today)
    .fetch_all(pool)
    .await?;

    let mut history = InMemoryHistory::new();
    for row in rows {
        let window: ReminderWindow = match row.window.parse() {
            Ok(w) => w,
            Err(e) => {
                tracing::warn!(
                    subscription_id = %row.subscription_id,
                    window = %row.window,
                    error = %e,
                    "Skipping history row with unknown window tag"
                );
                continue;
            }
        };
        history.record(EmissionKey {
            subscription_id: SubscriptionId(row.subscription_id),
            window,
            day_offset: row.day_offset,
            emitted_on: today,
        });
    }

    Ok(history)
}

/// Persist a surviving reminder
///
/// The (subscription, window, day) unique index is the storage-layer
/// backstop for the non-atomic check-then-emit sequence: if a concurrent
/// pass already recorded this reminder, the insert is a no-op and the
/// caller skips delivery.
pub async fn record_notification(
    pool: &PgPool,
    event: &ReminderEvent,
    today: Date,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO notification_log (
            id, subscription_id, owner_id, window, day_offset, title, body, emitted_on
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (subscription_id, window, emitted_on) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(event.subscription_id.0)
    .bind(event.owner_id.0)
    .bind(event.window.as_str())
    .bind(event.day_offset)
    .bind(&event.title)
    .bind(&event.body)
    .bind(today)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
