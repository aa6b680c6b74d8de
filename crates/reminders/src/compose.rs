//! Message composer
//!
//! Renders a reminder candidate into a human-readable title and body.
//! Pure function, one template per window, no I/O.

use crate::event::ReminderCandidate;
use crate::window::ReminderWindow;

/// Rendered reminder content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderMessage {
    pub title: String,
    pub body: String,
}

/// Render a candidate into its title and body
///
/// Every body carries the service name verbatim and the cost formatted to
/// two decimal places; day counts are exact.
pub fn compose(candidate: &ReminderCandidate) -> ReminderMessage {
    let name = &candidate.service_name;
    let cost = format_cost(candidate.cost_cents);

    match candidate.window {
        ReminderWindow::Overdue => {
            let days = days_label(candidate.day_offset.abs());
            ReminderMessage {
                title: format!("Payment overdue: {}", name),
                body: format!(
                    "Your {} payment of {} is {} overdue. Check whether the renewal went through.",
                    name, cost, days
                ),
            }
        }
        ReminderWindow::DueToday => ReminderMessage {
            title: format!("{} renews today", name),
            body: format!("Your {} subscription renews today for {}.", name, cost),
        },
        ReminderWindow::FinalNotice => ReminderMessage {
            title: format!("Final notice: {} renews tomorrow", name),
            body: format!("Your {} subscription renews tomorrow for {}.", name, cost),
        },
        ReminderWindow::RenewalReminder => {
            let days = days_label(candidate.day_offset);
            ReminderMessage {
                title: format!("{} renews in {}", name, days),
                body: format!("Your {} subscription renews in {} for {}.", name, days, cost),
            }
        }
        ReminderWindow::ThirtyDayNotice => ReminderMessage {
            title: format!("Upcoming renewal: {}", name),
            body: format!("Your {} subscription renews in 30 days for {}.", name, cost),
        },
    }
}

/// Format a cost in cents as dollars with two decimal places
fn format_cost(cents: i64) -> String {
    format!("${:.2}", cents as f64 / 100.0)
}

fn days_label(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subtrack_shared::{SubscriptionId, UserId};

    fn candidate(window: ReminderWindow, day_offset: i64) -> ReminderCandidate {
        ReminderCandidate {
            subscription_id: SubscriptionId::new(),
            owner_id: UserId::new(),
            window,
            day_offset,
            service_name: "Netflix".to_string(),
            cost_cents: 1299,
        }
    }

    #[test]
    fn test_cost_formatted_to_two_decimals() {
        assert_eq!(format_cost(1299), "$12.99");
        assert_eq!(format_cost(500), "$5.00");
        assert_eq!(format_cost(40), "$0.40");
    }

    #[test]
    fn test_body_contains_cost_and_name_verbatim() {
        for (window, offset) in [
            (ReminderWindow::Overdue, -3),
            (ReminderWindow::DueToday, 0),
            (ReminderWindow::FinalNotice, 1),
            (ReminderWindow::RenewalReminder, 5),
            (ReminderWindow::ThirtyDayNotice, 30),
        ] {
            let msg = compose(&candidate(window, offset));
            assert!(msg.body.contains("$12.99"), "{}: {}", window, msg.body);
            assert!(msg.body.contains("Netflix"), "{}: {}", window, msg.body);
        }
    }

    #[test]
    fn test_seven_day_body_states_exact_day_count() {
        let msg = compose(&candidate(ReminderWindow::RenewalReminder, 7));
        assert!(msg.body.contains("7 days"));

        let msg = compose(&candidate(ReminderWindow::RenewalReminder, 2));
        assert!(msg.body.contains("2 days"));
    }

    #[test]
    fn test_overdue_body_states_days_overdue() {
        let msg = compose(&candidate(ReminderWindow::Overdue, -3));
        assert!(msg.body.contains("3 days"));
        assert!(msg.body.contains("overdue"));

        // Singular form one day past due
        let msg = compose(&candidate(ReminderWindow::Overdue, -1));
        assert!(msg.body.contains("1 day overdue"));
    }

    #[test]
    fn test_due_today_mentions_today() {
        let msg = compose(&candidate(ReminderWindow::DueToday, 0));
        assert!(msg.title.contains("today"));
        assert!(msg.body.contains("today"));
    }

    #[test]
    fn test_final_notice_mentions_tomorrow() {
        let msg = compose(&candidate(ReminderWindow::FinalNotice, 1));
        assert!(msg.body.contains("tomorrow"));
    }
}
