//! Reminder rule engine
//!
//! Single source of truth for the renewal reminder rules. `evaluate` is a
//! pure, deterministic function over explicit inputs: same subscription,
//! tier, preferences, and date always produce the same candidates. "Today"
//! is injected; nothing in here reads a clock.
//!
//! Gate order per window:
//! 1. overdue (offset < 0) — unconditional for every tier
//! 2. due today (offset == 0) — unconditional for every tier
//! 3. final notice (offset == 1) — tier gate, then 1-day preference
//! 4. renewal reminder (2 <= offset <= 7) — 7-day preference only, fires
//!    on every day in the range
//! 5. thirty-day notice (offset == 30) — tier gate, then 30-day preference
//!
//! The offset ranges are disjoint, so at most one window fires per
//! subscription per day.

use subtrack_shared::{PlanTier, ReminderPreferences, Subscription};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::compose::compose;
use crate::error::{ReminderError, ReminderResult};
use crate::event::{ReminderCandidate, ReminderEvent};
use crate::policy::is_window_allowed;
use crate::window::{classify_offset, ReminderWindow};

/// Calendar-date format served by the upstream store
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse a subscription's renewal date
///
/// A malformed date is an `InvalidSubscriptionData` error scoped to that
/// one subscription; batch callers skip the item and continue.
pub fn parse_renewal_date(subscription: &Subscription) -> ReminderResult<Date> {
    Date::parse(&subscription.renewal_date, DATE_FORMAT).map_err(|e| {
        ReminderError::InvalidSubscriptionData {
            subscription_id: subscription.id,
            detail: format!("unparsable renewal date {:?}: {}", subscription.renewal_date, e),
        }
    })
}

/// Compute the candidate reminders for one subscription on one day
///
/// Returns zero or one composed events. Callers are expected to pre-filter
/// non-active subscriptions; a cancelled subscription passed in anyway
/// produces no events. Missing preferences are the caller's concern —
/// `ReminderPreferences::default()` mirrors the store's default row.
pub fn evaluate(
    subscription: &Subscription,
    tier: PlanTier,
    preferences: &ReminderPreferences,
    today: Date,
) -> ReminderResult<Vec<ReminderEvent>> {
    if !subscription.status.is_active() {
        return Ok(Vec::new());
    }

    let renewal = parse_renewal_date(subscription)?;
    let day_offset = (renewal - today).whole_days();

    let Some(window) = classify_offset(day_offset) else {
        return Ok(Vec::new());
    };

    if window.tier_gated() && !is_window_allowed(tier, window) {
        tracing::debug!(
            subscription_id = %subscription.id,
            window = %window,
            tier = %tier,
            "Window closed for tier"
        );
        return Ok(Vec::new());
    }

    let opted_in = match window {
        ReminderWindow::Overdue | ReminderWindow::DueToday => true,
        ReminderWindow::FinalNotice => preferences.one_day,
        ReminderWindow::RenewalReminder => preferences.seven_day,
        ReminderWindow::ThirtyDayNotice => preferences.thirty_day,
    };
    if !opted_in {
        return Ok(Vec::new());
    }

    let candidate = ReminderCandidate {
        subscription_id: subscription.id,
        owner_id: subscription.owner_id,
        window,
        day_offset,
        service_name: subscription.name.clone(),
        cost_cents: subscription.cost_cents,
    };
    let message = compose(&candidate);

    Ok(vec![ReminderEvent {
        subscription_id: candidate.subscription_id,
        owner_id: candidate.owner_id,
        window: candidate.window,
        day_offset: candidate.day_offset,
        title: message.title,
        body: message.body,
    }])
}
