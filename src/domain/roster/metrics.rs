//! Dashboard metrics aggregation.

use serde::Serialize;

use crate::domain::foundation::Timestamp;

use super::amount::total_minor_units;
use super::{Member, MemberStatus, Payment};

/// Aggregate numbers shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    /// Exact sum of all recorded payments, in minor units.
    pub total_revenue_minor_units: i64,

    /// Roster size.
    pub total_members: usize,

    /// Members whose expiry date is today or later.
    pub active_members: usize,

    /// Members who joined in the current calendar month of the current
    /// year.
    pub new_joinees: usize,

    /// Members expiring within the next seven days (strict bounds: not yet
    /// expired, not a full week away).
    pub expiring_soon: usize,
}

impl DashboardMetrics {
    /// Computes dashboard metrics from a full roster snapshot at `now`.
    ///
    /// Pure aggregation; callers are expected to refetch both collections
    /// after any mutation so these numbers are never stale.
    pub fn summarize(members: &[Member], payments: &[Payment], now: Timestamp) -> Self {
        let today = now.date_utc();

        Self {
            total_revenue_minor_units: total_minor_units(payments.iter().map(|p| &p.amount)),
            total_members: members.len(),
            active_members: members
                .iter()
                .filter(|m| m.status(today) == MemberStatus::Active)
                .count(),
            new_joinees: members.iter().filter(|m| m.joined_in_month(today)).count(),
            expiring_soon: members.iter().filter(|m| m.expiring_soon(now)).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AccountId, MemberId, PaymentId};
    use crate::domain::roster::{Amount, MemberPlan, PaymentMethod, Phone};
    use chrono::{DateTime, NaiveDate, Utc};

    fn at(s: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc),
        )
    }

    fn member_expiring(owner: AccountId, join: NaiveDate) -> Member {
        Member::register(
            MemberId::new(),
            owner,
            "Member",
            Phone::try_new("9000000001").unwrap(),
            MemberPlan::Monthly,
            join,
        )
    }

    fn payment(owner: AccountId, minor: i64) -> Payment {
        Payment::record(
            PaymentId::new(),
            MemberId::new(),
            owner,
            Amount::try_new(minor).unwrap(),
            PaymentMethod::Cash,
            Timestamp::now(),
        )
    }

    #[test]
    fn empty_roster_is_all_zeroes() {
        let metrics = DashboardMetrics::summarize(&[], &[], Timestamp::now());
        assert_eq!(metrics.total_revenue_minor_units, 0);
        assert_eq!(metrics.total_members, 0);
        assert_eq!(metrics.active_members, 0);
        assert_eq!(metrics.new_joinees, 0);
        assert_eq!(metrics.expiring_soon, 0);
    }

    #[test]
    fn one_expiring_one_expired_splits_counts() {
        let owner = AccountId::new();
        let now = at("2024-02-12T12:00:00Z");

        // Expires 2024-02-15: three days out, active and expiring soon.
        let soon = member_expiring(owner, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        // Expired 2024-02-11: one day past.
        let lapsed = member_expiring(owner, NaiveDate::from_ymd_opt(2024, 1, 11).unwrap());

        let metrics = DashboardMetrics::summarize(&[soon, lapsed], &[], now);
        assert_eq!(metrics.total_members, 2);
        assert_eq!(metrics.active_members, 1);
        assert_eq!(metrics.expiring_soon, 1);
    }

    #[test]
    fn revenue_sums_exactly_in_minor_units() {
        let owner = AccountId::new();
        let payments = vec![payment(owner, 1), payment(owner, 2), payment(owner, 49_900)];

        let metrics = DashboardMetrics::summarize(&[], &payments, Timestamp::now());
        assert_eq!(metrics.total_revenue_minor_units, 49_903);
    }

    #[test]
    fn new_joinees_counts_current_month_and_year_only() {
        let owner = AccountId::new();
        let now = at("2024-02-12T12:00:00Z");

        let this_month = member_expiring(owner, NaiveDate::from_ymd_opt(2024, 2, 3).unwrap());
        let last_month = member_expiring(owner, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        // Same month, last year: the classic miscount this fixes.
        let last_year = member_expiring(owner, NaiveDate::from_ymd_opt(2023, 2, 3).unwrap());

        let metrics =
            DashboardMetrics::summarize(&[this_month, last_month, last_year], &[], now);
        assert_eq!(metrics.new_joinees, 1);
    }

    #[test]
    fn member_expiring_today_counts_active_but_not_soon() {
        let owner = AccountId::new();
        // Expires 2024-02-15; it is 2024-02-15 noon.
        let member = member_expiring(owner, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let now = at("2024-02-15T12:00:00Z");

        let metrics = DashboardMetrics::summarize(&[member], &[], now);
        assert_eq!(metrics.active_members, 1);
        // Midnight of the expiry date is already behind `now`.
        assert_eq!(metrics.expiring_soon, 0);
    }
}
