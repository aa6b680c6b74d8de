//! Reminder event values
//!
//! Candidates are ephemeral: the engine produces them, the duplicate
//! suppressor filters them, and the caller persists whatever survives.
//! Nothing here is stored by the engine itself.

use serde::{Deserialize, Serialize};
use subtrack_shared::{SubscriptionId, UserId};
use time::Date;

use crate::suppress::EmissionKey;
use crate::window::ReminderWindow;

/// An unrendered reminder produced by the rule engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderCandidate {
    pub subscription_id: SubscriptionId,
    pub owner_id: UserId,
    pub window: ReminderWindow,
    /// Renewal date minus today, in whole days; negative means overdue
    pub day_offset: i64,
    pub service_name: String,
    pub cost_cents: i64,
}

/// A fully composed reminder, ready for the notification sink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderEvent {
    pub subscription_id: SubscriptionId,
    pub owner_id: UserId,
    pub window: ReminderWindow,
    pub day_offset: i64,
    pub title: String,
    pub body: String,
}

impl ReminderEvent {
    /// Structured duplicate-detection key for an emission on `today`
    pub fn emission_key(&self, today: Date) -> EmissionKey {
        EmissionKey {
            subscription_id: self.subscription_id,
            window: self.window,
            day_offset: self.day_offset,
            emitted_on: today,
        }
    }
}
