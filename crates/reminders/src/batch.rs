//! Batch evaluation pass
//!
//! Runs the rule engine across many subscriptions, isolating per-item
//! failures so one malformed row never blocks the rest. The pass returns
//! partial results plus the errors it collected instead of failing fast.

use std::collections::HashMap;

use subtrack_shared::{PlanTier, ReminderPreferences, Subscription, UserId};
use time::Date;

use crate::engine::evaluate;
use crate::error::ReminderError;
use crate::event::ReminderEvent;
use crate::suppress::{should_emit, NotificationHistory};

/// Per-owner tier and preference lookups
///
/// `None` means the owner has no row yet; the pass falls back to the
/// documented defaults (`Free` tier, default preference row).
pub trait OwnerDirectory {
    fn plan_tier(&self, owner_id: UserId) -> Option<PlanTier>;
    fn preferences(&self, owner_id: UserId) -> Option<ReminderPreferences>;
}

/// Outcome of one evaluation pass
#[derive(Debug, Default)]
pub struct PassOutcome {
    /// Candidates that survived duplicate suppression, in input order
    pub events: Vec<ReminderEvent>,
    /// Per-item failures collected along the way
    pub errors: Vec<ReminderError>,
}

/// Evaluate every active subscription for `today`
///
/// Non-active subscriptions are filtered up front. A failed history lookup
/// suppresses that one candidate (fail closed) and is reported alongside
/// the surviving events. The caller records and delivers the survivors.
pub fn run_pass<D, H>(
    subscriptions: &[Subscription],
    directory: &D,
    history: &H,
    today: Date,
) -> PassOutcome
where
    D: OwnerDirectory,
    H: NotificationHistory,
{
    let mut outcome = PassOutcome::default();

    for subscription in subscriptions.iter().filter(|s| s.status.is_active()) {
        let tier = directory.plan_tier(subscription.owner_id).unwrap_or_default();
        let preferences = directory
            .preferences(subscription.owner_id)
            .unwrap_or_default();

        let candidates = match evaluate(subscription, tier, &preferences, today) {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(
                    subscription_id = %subscription.id,
                    error = %e,
                    "Skipping subscription"
                );
                outcome.errors.push(e);
                continue;
            }
        };

        for event in candidates {
            match should_emit(&event, today, history) {
                Ok(true) => outcome.events.push(event),
                Ok(false) => {
                    tracing::debug!(
                        subscription_id = %event.subscription_id,
                        window = %event.window,
                        "Duplicate suppressed"
                    );
                }
                Err(e) => {
                    // Fail closed: better to miss a reminder than double-send
                    tracing::warn!(
                        subscription_id = %event.subscription_id,
                        window = %event.window,
                        error = %e,
                        "History lookup failed, suppressing candidate"
                    );
                    outcome.errors.push(e);
                }
            }
        }
    }

    outcome
}

/// Map-backed directory for tests and preloaded worker passes
#[derive(Debug, Default, Clone)]
pub struct InMemoryDirectory {
    tiers: HashMap<UserId, PlanTier>,
    preferences: HashMap<UserId, ReminderPreferences>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tier(&mut self, owner_id: UserId, tier: PlanTier) {
        self.tiers.insert(owner_id, tier);
    }

    pub fn set_preferences(&mut self, owner_id: UserId, preferences: ReminderPreferences) {
        self.preferences.insert(owner_id, preferences);
    }
}

impl OwnerDirectory for InMemoryDirectory {
    fn plan_tier(&self, owner_id: UserId) -> Option<PlanTier> {
        self.tiers.get(&owner_id).copied()
    }

    fn preferences(&self, owner_id: UserId) -> Option<ReminderPreferences> {
        self.preferences.get(&owner_id).copied()
    }
}
