//! Plan policy table
//!
//! Static mapping from plan tier to the reminder windows it may ever
//! receive, consulted before the per-owner preference gates. The table
//! answers one question: "is this window ever allowed for this tier?"

use subtrack_shared::PlanTier;

use crate::window::ReminderWindow;

/// Pure lookup of the tier gate for a window
///
/// - `free`: 7-day tail, due-today, and overdue only
/// - `pro` / `business`: all windows
pub fn is_window_allowed(tier: PlanTier, window: ReminderWindow) -> bool {
    match window {
        ReminderWindow::Overdue | ReminderWindow::DueToday | ReminderWindow::RenewalReminder => {
            true
        }
        ReminderWindow::ThirtyDayNotice => tier.thirty_day_allowed(),
        ReminderWindow::FinalNotice => tier.final_notice_allowed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_tier_denied_gated_windows() {
        assert!(!is_window_allowed(PlanTier::Free, ReminderWindow::ThirtyDayNotice));
        assert!(!is_window_allowed(PlanTier::Free, ReminderWindow::FinalNotice));
    }

    #[test]
    fn test_free_tier_keeps_ungated_windows() {
        assert!(is_window_allowed(PlanTier::Free, ReminderWindow::Overdue));
        assert!(is_window_allowed(PlanTier::Free, ReminderWindow::DueToday));
        assert!(is_window_allowed(PlanTier::Free, ReminderWindow::RenewalReminder));
    }

    #[test]
    fn test_paid_tiers_allow_everything() {
        for tier in [PlanTier::Pro, PlanTier::Business] {
            for window in [
                ReminderWindow::Overdue,
                ReminderWindow::DueToday,
                ReminderWindow::FinalNotice,
                ReminderWindow::RenewalReminder,
                ReminderWindow::ThirtyDayNotice,
            ] {
                assert!(is_window_allowed(tier, window), "{} should allow {}", tier, window);
            }
        }
    }
}
