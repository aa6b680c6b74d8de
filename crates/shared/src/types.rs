//! Common types used across Subtrack

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// ID Wrappers
// =============================================================================

/// Subscription ID wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(pub Uuid);

impl SubscriptionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SubscriptionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// User ID wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// =============================================================================
// Enums
// =============================================================================

/// Plan tier for a user's account
///
/// The tier gates which reminder windows a user may ever receive,
/// independent of their per-window preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Free,
    Pro,
    Business,
}

impl Default for PlanTier {
    fn default() -> Self {
        Self::Free
    }
}

impl PlanTier {
    /// Whether this tier may receive the 30-day advance notice
    pub fn thirty_day_allowed(&self) -> bool {
        matches!(self, Self::Pro | Self::Business)
    }

    /// Whether this tier may receive the 1-day final notice
    pub fn final_notice_allowed(&self) -> bool {
        matches!(self, Self::Pro | Self::Business)
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Pro => write!(f, "pro"),
            Self::Business => write!(f, "business"),
        }
    }
}

impl std::str::FromStr for PlanTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "pro" => Ok(Self::Pro),
            "business" => Ok(Self::Business),
            _ => Err(format!("Invalid plan tier: {}", s)),
        }
    }
}

/// Billing cycle for a tracked subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

impl std::fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl std::str::FromStr for BillingCycle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(format!("Invalid billing cycle: {}", s)),
        }
    }
}

/// Lifecycle status of a tracked subscription
///
/// The renewal date is only meaningful while a subscription is active;
/// a cancelled subscription never produces reminders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
}

impl Default for SubscriptionStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl SubscriptionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(format!("Invalid subscription status: {}", s)),
        }
    }
}

// =============================================================================
// Models
// =============================================================================

/// A recurring payment obligation tracked for a user
///
/// `renewal_date` is served by the upstream store as an ISO-8601 calendar
/// date (`YYYY-MM-DD`, no time component). Parsing is deferred to the
/// reminder engine so a malformed row poisons only itself, not the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub owner_id: UserId,
    pub name: String,
    /// Cost per billing cycle, in cents
    pub cost_cents: i64,
    pub billing_cycle: BillingCycle,
    pub renewal_date: String,
    pub status: SubscriptionStatus,
}

/// Per-owner opt-in flags for the gated reminder windows
///
/// The 7-day window is the only opt-in available on every tier; the due-today
/// and overdue windows are unconditional and carry no preference flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderPreferences {
    /// 30-day advance notice (pro/business only)
    pub thirty_day: bool,
    /// Multi-day warning tail covering offsets 2 through 7
    pub seven_day: bool,
    /// Final notice one day before renewal (pro/business only)
    pub one_day: bool,
}

impl Default for ReminderPreferences {
    /// Mirrors the default row the settings store creates on first use
    fn default() -> Self {
        Self {
            thirty_day: false,
            seven_day: true,
            one_day: false,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_tier_default() {
        assert_eq!(PlanTier::default(), PlanTier::Free);
    }

    #[test]
    fn test_plan_tier_window_gates() {
        assert!(!PlanTier::Free.thirty_day_allowed());
        assert!(!PlanTier::Free.final_notice_allowed());
        assert!(PlanTier::Pro.thirty_day_allowed());
        assert!(PlanTier::Pro.final_notice_allowed());
        assert!(PlanTier::Business.thirty_day_allowed());
        assert!(PlanTier::Business.final_notice_allowed());
    }

    #[test]
    fn test_plan_tier_display_and_parse() {
        assert_eq!(format!("{}", PlanTier::Free), "free");
        assert_eq!(format!("{}", PlanTier::Business), "business");
        assert_eq!("pro".parse::<PlanTier>().unwrap(), PlanTier::Pro);
        assert_eq!("PRO".parse::<PlanTier>().unwrap(), PlanTier::Pro);
        assert!("enterprise".parse::<PlanTier>().is_err());
    }

    #[test]
    fn test_billing_cycle_parse() {
        assert_eq!("monthly".parse::<BillingCycle>().unwrap(), BillingCycle::Monthly);
        assert_eq!("YEARLY".parse::<BillingCycle>().unwrap(), BillingCycle::Yearly);
        assert!("weekly".parse::<BillingCycle>().is_err());
    }

    #[test]
    fn test_subscription_status_parse() {
        assert_eq!(
            "active".parse::<SubscriptionStatus>().unwrap(),
            SubscriptionStatus::Active
        );
        // Both spellings show up in imported data
        assert_eq!(
            "canceled".parse::<SubscriptionStatus>().unwrap(),
            SubscriptionStatus::Cancelled
        );
        assert_eq!(
            "cancelled".parse::<SubscriptionStatus>().unwrap(),
            SubscriptionStatus::Cancelled
        );
        assert!(SubscriptionStatus::Active.is_active());
        assert!(!SubscriptionStatus::Cancelled.is_active());
    }

    #[test]
    fn test_reminder_preferences_defaults() {
        let prefs = ReminderPreferences::default();
        assert!(!prefs.thirty_day);
        assert!(prefs.seven_day);
        assert!(!prefs.one_day);
    }

    #[test]
    fn test_subscription_id_new_is_unique() {
        assert_ne!(SubscriptionId::new(), SubscriptionId::new());
    }

    #[test]
    fn test_user_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let user_id: UserId = uuid.into();
        assert_eq!(user_id.0, uuid);
    }
}
