//! Member plan definitions and expiry-date derivation.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Billing interval for a roster member.
///
/// Distinct from the account subscription plans
/// (`domain::billing::SubscriptionPlan`); the two enumerations must not be
/// conflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberPlan {
    Monthly,
    Quarterly,
    Annually,
}

impl MemberPlan {
    /// Number of calendar months this plan covers.
    pub fn months(&self) -> u32 {
        match self {
            MemberPlan::Monthly => 1,
            MemberPlan::Quarterly => 3,
            MemberPlan::Annually => 12,
        }
    }

    /// Returns the display name for this plan.
    pub fn display_name(&self) -> &'static str {
        match self {
            MemberPlan::Monthly => "Monthly",
            MemberPlan::Quarterly => "Quarterly",
            MemberPlan::Annually => "Annually",
        }
    }

    /// Derives the membership expiry date from a join date.
    ///
    /// Pure calendar arithmetic: Monthly adds one month, Quarterly three,
    /// Annually twelve. When the target month is shorter than the join
    /// day the result clamps to the last day of the target month
    /// (Jan 31 + 1 month = Feb 28, or Feb 29 in a leap year). That clamping
    /// is the documented overflow rule for this codebase.
    pub fn derive_expiry(&self, join_date: NaiveDate) -> NaiveDate {
        join_date
            .checked_add_months(Months::new(self.months()))
            .unwrap_or(NaiveDate::MAX)
    }
}

impl std::fmt::Display for MemberPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
