//! Account aggregate and the trial/subscription classifier.
//!
//! An Account is a gym owner's identity record plus billing metadata. Every
//! owner starts on a 14-day trial; once a verified checkout confirmation is
//! accepted the account flips to an active subscription with a plan.
//!
//! # Invariants
//!
//! - `trial_end` is set exactly once, at sign-up, and is never advanced.
//! - `plan` and `subscribed_at` are only present on subscribed accounts.
//! - Access gating is derived from live state via [`Account::billing_snapshot`]
//!   on every protected request; the result is never cached across requests.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, Timestamp};

use super::{BillingError, SubscriptionPlan};

/// Length of the free trial granted at sign-up.
pub const TRIAL_DAYS: i64 = 14;

/// Where an account sits in the paid-subscription lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Inside (or past) the time-boxed trial, never paid.
    Trial,

    /// Paid subscription on a plan.
    Active,
}

/// Account aggregate - a gym owner with billing metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for this account.
    pub id: AccountId,

    /// Login email, unique across accounts.
    pub email: String,

    /// Owner's full name.
    pub full_name: String,

    /// Display name of the gym.
    pub gym_name: String,

    /// End of the free trial. Set once at sign-up. `None` only for
    /// legacy/incomplete records, which classify as a metadata error.
    pub trial_end: Option<Timestamp>,

    /// Trial or active subscription.
    pub subscription_status: SubscriptionStatus,

    /// Subscription plan, present once subscribed.
    pub plan: Option<SubscriptionPlan>,

    /// When the subscription was activated.
    pub subscribed_at: Option<Timestamp>,

    /// When the account was created.
    pub created_at: Timestamp,
}

/// Result of classifying an account's billing state at an instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingSnapshot {
    /// Trial window still covers `now` (inclusive boundary).
    pub trial_active: bool,

    /// Account holds a paid subscription.
    pub subscribed: bool,

    /// Plan of the paid subscription, if any.
    pub plan: Option<SubscriptionPlan>,

    /// Badge text shown next to the gym name.
    pub display_label: String,

    /// Whether roster and payment screens may be rendered.
    pub has_access: bool,
}

impl Account {
    /// Creates a new account at sign-up.
    ///
    /// The trial clock starts immediately: `trial_end = now + 14 days`.
    pub fn sign_up(
        id: AccountId,
        email: impl Into<String>,
        full_name: impl Into<String>,
        gym_name: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            full_name: full_name.into(),
            gym_name: gym_name.into(),
            trial_end: Some(now.add_days(TRIAL_DAYS)),
            subscription_status: SubscriptionStatus::Trial,
            plan: None,
            subscribed_at: None,
            created_at: now,
        }
    }

    /// Activates a paid subscription after a verified checkout confirmation.
    ///
    /// Leaves `trial_end` untouched: the trial window is historical fact,
    /// not a lever.
    pub fn activate_subscription(&mut self, plan: SubscriptionPlan, now: Timestamp) {
        self.subscription_status = SubscriptionStatus::Active;
        self.plan = Some(plan);
        self.subscribed_at = Some(now);
    }

    /// Classifies this account's billing state at `now`.
    ///
    /// The trial boundary is inclusive: an account whose `trial_end` equals
    /// `now` is still on trial.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::MetadataMissing` when `trial_end` is absent.
    /// That state is terminal for the current session and must never be
    /// collapsed into "trial expired".
    pub fn billing_snapshot(&self, now: Timestamp) -> Result<BillingSnapshot, BillingError> {
        let trial_end = self
            .trial_end
            .ok_or(BillingError::MetadataMissing(self.id))?;

        let trial_active = trial_end >= now;
        let subscribed = self.subscription_status == SubscriptionStatus::Active;

        let display_label = if trial_active {
            "Trial (Pro)".to_string()
        } else if subscribed {
            match self.plan {
                Some(plan) => format!("{} (Pro)", plan.display_name()),
                None => "Free".to_string(),
            }
        } else {
            "Free".to_string()
        };

        Ok(BillingSnapshot {
            trial_active,
            subscribed,
            plan: self.plan,
            display_label,
            has_access: trial_active || subscribed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn at(s: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc),
        )
    }

    fn fresh_account(now: Timestamp) -> Account {
        Account::sign_up(
            AccountId::new(),
            "owner@ironworks.example",
            "Priya Nair",
            "Ironworks Gym",
            now,
        )
    }

    // Sign-up tests

    #[test]
    fn sign_up_starts_trial_of_fourteen_days() {
        let now = at("2024-01-01T10:00:00Z");
        let account = fresh_account(now);

        assert_eq!(account.subscription_status, SubscriptionStatus::Trial);
        assert_eq!(account.trial_end, Some(now.add_days(14)));
        assert!(account.plan.is_none());
        assert!(account.subscribed_at.is_none());
    }

    #[test]
    fn activation_does_not_advance_trial_end() {
        let now = at("2024-01-01T10:00:00Z");
        let mut account = fresh_account(now);
        let trial_end = account.trial_end;

        account.activate_subscription(SubscriptionPlan::Annual, now.add_days(20));

        assert_eq!(account.trial_end, trial_end);
        assert_eq!(account.subscription_status, SubscriptionStatus::Active);
        assert_eq!(account.plan, Some(SubscriptionPlan::Annual));
        assert_eq!(account.subscribed_at, Some(now.add_days(20)));
    }

    // Classifier tests

    #[test]
    fn within_trial_classifies_trial_active() {
        let now = at("2024-01-05T10:00:00Z");
        let account = fresh_account(at("2024-01-01T10:00:00Z"));

        let snapshot = account.billing_snapshot(now).unwrap();
        assert!(snapshot.trial_active);
        assert!(!snapshot.subscribed);
        assert!(snapshot.has_access);
        assert_eq!(snapshot.display_label, "Trial (Pro)");
    }

    #[test]
    fn trial_end_exactly_now_is_still_active() {
        let signup = at("2024-01-01T10:00:00Z");
        let account = fresh_account(signup);

        // The trial's final instant still counts.
        let snapshot = account.billing_snapshot(signup.add_days(14)).unwrap();
        assert!(snapshot.trial_active);
        assert!(snapshot.has_access);
    }

    #[test]
    fn one_second_past_trial_end_is_expired() {
        let signup = at("2024-01-01T10:00:00Z");
        let account = fresh_account(signup);

        let just_after = Timestamp::from_datetime(
            *signup.add_days(14).as_datetime() + chrono::Duration::seconds(1),
        );
        let snapshot = account.billing_snapshot(just_after).unwrap();
        assert!(!snapshot.trial_active);
        assert!(!snapshot.has_access);
        assert_eq!(snapshot.display_label, "Free");
    }

    #[test]
    fn subscribed_account_has_access_after_trial() {
        let signup = at("2024-01-01T10:00:00Z");
        let mut account = fresh_account(signup);
        account.activate_subscription(SubscriptionPlan::SixMonths, signup.add_days(15));

        let snapshot = account.billing_snapshot(signup.add_days(30)).unwrap();
        assert!(!snapshot.trial_active);
        assert!(snapshot.subscribed);
        assert!(snapshot.has_access);
        assert_eq!(snapshot.display_label, "6 Months (Pro)");
    }

    #[test]
    fn trial_label_wins_while_trial_still_runs() {
        let signup = at("2024-01-01T10:00:00Z");
        let mut account = fresh_account(signup);
        account.activate_subscription(SubscriptionPlan::Monthly, signup.add_days(2));

        let snapshot = account.billing_snapshot(signup.add_days(5)).unwrap();
        assert_eq!(snapshot.display_label, "Trial (Pro)");
        assert!(snapshot.subscribed);
    }

    #[test]
    fn missing_trial_end_is_metadata_error_not_denial() {
        let now = at("2024-06-01T00:00:00Z");
        let mut account = fresh_account(now);
        account.trial_end = None;

        let result = account.billing_snapshot(now);
        assert!(matches!(result, Err(BillingError::MetadataMissing(_))));
    }

    #[test]
    fn missing_trial_end_never_grants_access_even_when_subscribed_flag_set() {
        let now = at("2024-06-01T00:00:00Z");
        let mut account = fresh_account(now);
        account.trial_end = None;
        account.activate_subscription(SubscriptionPlan::Annual, now);

        // Incomplete metadata refuses to classify at all; the caller must
        // not render financial data from a half-formed record.
        assert!(account.billing_snapshot(now).is_err());
    }
}
