//! Account subscription plan definitions.
//!
//! These are the billing intervals a gym owner can subscribe to. They are
//! distinct from the roster member plans (`domain::roster::MemberPlan`) and
//! the two must never be conflated.

use serde::{Deserialize, Serialize};

/// Subscription plan for a gym-owner account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    /// Renews every month.
    Monthly,

    /// Six month commitment.
    SixMonths,

    /// Twelve month commitment, best value.
    Annual,
}

impl SubscriptionPlan {
    /// Returns the display name for this plan.
    pub fn display_name(&self) -> &'static str {
        match self {
            SubscriptionPlan::Monthly => "Monthly",
            SubscriptionPlan::SixMonths => "6 Months",
            SubscriptionPlan::Annual => "Annual",
        }
    }

    /// Returns the plan price in minor currency units (paise).
    pub fn price_minor_units(&self) -> i64 {
        match self {
            SubscriptionPlan::Monthly => 49_900,
            SubscriptionPlan::SixMonths => 259_900,
            SubscriptionPlan::Annual => 459_900,
        }
    }
}

impl std::fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_match_plan_cards() {
        assert_eq!(SubscriptionPlan::Monthly.display_name(), "Monthly");
        assert_eq!(SubscriptionPlan::SixMonths.display_name(), "6 Months");
        assert_eq!(SubscriptionPlan::Annual.display_name(), "Annual");
    }

    #[test]
    fn prices_are_in_minor_units() {
        assert_eq!(SubscriptionPlan::Monthly.price_minor_units(), 49_900);
        assert_eq!(SubscriptionPlan::SixMonths.price_minor_units(), 259_900);
        assert_eq!(SubscriptionPlan::Annual.price_minor_units(), 459_900);
    }

    #[test]
    fn plan_serializes_snake_case() {
        let json = serde_json::to_string(&SubscriptionPlan::SixMonths).unwrap();
        assert_eq!(json, "\"six_months\"");
    }

    #[test]
    fn plan_deserializes_from_snake_case() {
        let plan: SubscriptionPlan = serde_json::from_str("\"annual\"").unwrap();
        assert_eq!(plan, SubscriptionPlan::Annual);
    }
}
