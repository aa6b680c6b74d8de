//! Reminder engine error types

use subtrack_shared::SubscriptionId;
use thiserror::Error;

/// Errors produced while evaluating reminders
///
/// A batch pass never aborts on these: `InvalidSubscriptionData` skips the
/// one offending subscription, and `HistoryLookup` suppresses the one
/// candidate it could not verify (fail closed).
#[derive(Debug, Error)]
pub enum ReminderError {
    #[error("Invalid subscription data for {subscription_id}: {detail}")]
    InvalidSubscriptionData {
        subscription_id: SubscriptionId,
        detail: String,
    },

    #[error("Notification history lookup failed: {0}")]
    HistoryLookup(String),
}

pub type ReminderResult<T> = Result<T, ReminderError>;
