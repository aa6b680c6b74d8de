//! Reminder windows and day-offset classification
//!
//! A window is a named category of reminder tied to a day-offset range
//! relative to the renewal date. The ranges `{<0, =0, =1, 2..=7, =30}` are
//! disjoint by construction, so at most one window fires per subscription
//! per day.

use serde::{Deserialize, Serialize};

/// The closed set of reminder windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderWindow {
    /// Renewal date has passed (any negative offset)
    Overdue,
    /// Renewal is today
    DueToday,
    /// Renewal is tomorrow
    FinalNotice,
    /// Renewal is 2 to 7 days out (fires on every day in the range)
    RenewalReminder,
    /// Renewal is exactly 30 days out
    ThirtyDayNotice,
}

impl ReminderWindow {
    /// Stable string tag, also used as the window key in the history store
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::DueToday => "due_today",
            Self::FinalNotice => "final_notice",
            Self::RenewalReminder => "renewal_reminder",
            Self::ThirtyDayNotice => "thirty_day_notice",
        }
    }

    /// Whether this window is subject to a plan-tier gate
    ///
    /// Overdue and due-today are critical for every tier; the 7-day tail is
    /// deliberately available to every tier as well.
    pub fn tier_gated(&self) -> bool {
        matches!(self, Self::FinalNotice | Self::ThirtyDayNotice)
    }

    /// Whether this window is subject to a per-owner opt-in
    pub fn preference_gated(&self) -> bool {
        matches!(
            self,
            Self::FinalNotice | Self::RenewalReminder | Self::ThirtyDayNotice
        )
    }
}

impl std::fmt::Display for ReminderWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReminderWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overdue" => Ok(Self::Overdue),
            "due_today" => Ok(Self::DueToday),
            "final_notice" => Ok(Self::FinalNotice),
            "renewal_reminder" => Ok(Self::RenewalReminder),
            "thirty_day_notice" => Ok(Self::ThirtyDayNotice),
            _ => Err(format!("Invalid reminder window: {}", s)),
        }
    }
}

/// Map a day-offset (renewal date minus today, in whole days) to its window
///
/// Offsets 8..=29 and 31+ are silent and return `None`.
pub fn classify_offset(day_offset: i64) -> Option<ReminderWindow> {
    match day_offset {
        o if o < 0 => Some(ReminderWindow::Overdue),
        0 => Some(ReminderWindow::DueToday),
        1 => Some(ReminderWindow::FinalNotice),
        2..=7 => Some(ReminderWindow::RenewalReminder),
        30 => Some(ReminderWindow::ThirtyDayNotice),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_offset_partition() {
        assert_eq!(classify_offset(-90), Some(ReminderWindow::Overdue));
        assert_eq!(classify_offset(-1), Some(ReminderWindow::Overdue));
        assert_eq!(classify_offset(0), Some(ReminderWindow::DueToday));
        assert_eq!(classify_offset(1), Some(ReminderWindow::FinalNotice));
        assert_eq!(classify_offset(2), Some(ReminderWindow::RenewalReminder));
        assert_eq!(classify_offset(7), Some(ReminderWindow::RenewalReminder));
        assert_eq!(classify_offset(30), Some(ReminderWindow::ThirtyDayNotice));
    }

    #[test]
    fn test_classify_offset_silent_ranges() {
        for offset in 8..=29 {
            assert_eq!(classify_offset(offset), None, "offset {} must be silent", offset);
        }
        for offset in [31, 32, 60, 365] {
            assert_eq!(classify_offset(offset), None, "offset {} must be silent", offset);
        }
    }

    #[test]
    fn test_window_tags_round_trip() {
        for window in [
            ReminderWindow::Overdue,
            ReminderWindow::DueToday,
            ReminderWindow::FinalNotice,
            ReminderWindow::RenewalReminder,
            ReminderWindow::ThirtyDayNotice,
        ] {
            assert_eq!(window.as_str().parse::<ReminderWindow>().unwrap(), window);
        }
    }

    #[test]
    fn test_window_gating_flags() {
        assert!(!ReminderWindow::Overdue.tier_gated());
        assert!(!ReminderWindow::DueToday.tier_gated());
        assert!(!ReminderWindow::RenewalReminder.tier_gated());
        assert!(ReminderWindow::FinalNotice.tier_gated());
        assert!(ReminderWindow::ThirtyDayNotice.tier_gated());

        assert!(!ReminderWindow::Overdue.preference_gated());
        assert!(!ReminderWindow::DueToday.preference_gated());
        assert!(ReminderWindow::RenewalReminder.preference_gated());
    }
}
