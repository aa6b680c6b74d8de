//! Duplicate suppressor
//!
//! Equality for "same reminder" is the structured key (subscription,
//! window, day-offset, calendar day of emission), never message text.
//! This keeps re-evaluation within a day idempotent: a page-load check and
//! a job tick on the same day agree on what was already sent.
//!
//! The check-then-emit sequence is not atomic with the caller's eventual
//! write; racing passes can double-emit. Callers needing a hard guarantee
//! enforce uniqueness on (subscription, window, day) at the storage layer.

use std::collections::HashSet;

use subtrack_shared::SubscriptionId;
use time::Date;

use crate::error::ReminderResult;
use crate::event::ReminderEvent;
use crate::window::ReminderWindow;

/// Structured identity of one emitted reminder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmissionKey {
    pub subscription_id: SubscriptionId,
    pub window: ReminderWindow,
    pub day_offset: i64,
    pub emitted_on: Date,
}

/// Read access to previously emitted reminders
///
/// Implementations may be backed by anything queryable; the worker preloads
/// the current day's rows into an in-memory set before the pass runs.
pub trait NotificationHistory {
    /// Whether a reminder with this exact key was already emitted
    fn was_emitted(&self, key: &EmissionKey) -> ReminderResult<bool>;
}

/// Decide whether a candidate survives duplicate suppression
///
/// Returns `Ok(false)` when a matching emission exists for `today`. A
/// lookup failure propagates as an error so the caller can suppress the
/// candidate and report it; silently treating failure as "not a duplicate"
/// would risk over-sending.
pub fn should_emit<H: NotificationHistory>(
    event: &ReminderEvent,
    today: Date,
    history: &H,
) -> ReminderResult<bool> {
    let key = event.emission_key(today);
    Ok(!history.was_emitted(&key)?)
}

/// In-memory history backed by a set of emission keys
///
/// Used by tests and by the worker, which hydrates it from the store's
/// rows for the current day.
#[derive(Debug, Default, Clone)]
pub struct InMemoryHistory {
    entries: HashSet<EmissionKey>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: EmissionKey) {
        self.entries.insert(key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl NotificationHistory for InMemoryHistory {
    fn was_emitted(&self, key: &EmissionKey) -> ReminderResult<bool> {
        Ok(self.entries.contains(key))
    }
}

/// History whose lookups always fail, for exercising the fail-closed path
#[cfg(test)]
pub struct FailingHistory;

#[cfg(test)]
impl NotificationHistory for FailingHistory {
    fn was_emitted(&self, _key: &EmissionKey) -> ReminderResult<bool> {
        Err(crate::error::ReminderError::HistoryLookup(
            "store unreachable".to_string(),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ReminderError;
    use subtrack_shared::UserId;
    use time::macros::date;

    fn event(subscription_id: SubscriptionId, window: ReminderWindow, day_offset: i64) -> ReminderEvent {
        ReminderEvent {
            subscription_id,
            owner_id: UserId::new(),
            window,
            day_offset,
            title: "t".to_string(),
            body: "b".to_string(),
        }
    }

    #[test]
    fn test_emits_when_history_empty() {
        let history = InMemoryHistory::new();
        let ev = event(SubscriptionId::new(), ReminderWindow::DueToday, 0);
        assert!(should_emit(&ev, date!(2026 - 03 - 01), &history).unwrap());
    }

    #[test]
    fn test_suppresses_exact_match() {
        let today = date!(2026 - 03 - 01);
        let ev = event(SubscriptionId::new(), ReminderWindow::FinalNotice, 1);

        let mut history = InMemoryHistory::new();
        history.record(ev.emission_key(today));

        assert!(!should_emit(&ev, today, &history).unwrap());
    }

    #[test]
    fn test_different_day_does_not_suppress() {
        let ev = event(SubscriptionId::new(), ReminderWindow::RenewalReminder, 5);

        let mut history = InMemoryHistory::new();
        history.record(ev.emission_key(date!(2026 - 03 - 01)));

        // Yesterday's emission does not block today's
        assert!(should_emit(&ev, date!(2026 - 03 - 02), &history).unwrap());
    }

    #[test]
    fn test_different_window_does_not_suppress() {
        let today = date!(2026 - 03 - 01);
        let id = SubscriptionId::new();

        let mut history = InMemoryHistory::new();
        history.record(event(id, ReminderWindow::RenewalReminder, 7).emission_key(today));

        let other = event(id, ReminderWindow::DueToday, 0);
        assert!(should_emit(&other, today, &history).unwrap());
    }

    #[test]
    fn test_lookup_failure_propagates() {
        let ev = event(SubscriptionId::new(), ReminderWindow::Overdue, -2);
        let result = should_emit(&ev, date!(2026 - 03 - 01), &FailingHistory);
        assert!(matches!(result, Err(ReminderError::HistoryLookup(_))));
    }
}
