//! Member aggregate entity.
//!
//! A Member is one person on a gym's roster, scoped to the owning account.
//!
//! # Invariants
//!
//! - `expiry_date` is always `plan.derive_expiry(join_date)`. It is never
//!   set directly; construction and every edit recompute it.
//! - Ownership never changes after registration.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::foundation::{AccountId, MemberId, OwnedByAccount, Timestamp};

use super::{MemberPlan, Phone};

/// Expiring-soon lookahead window in days.
pub const EXPIRY_WINDOW_DAYS: i64 = 7;

/// Classification of a member against their expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MemberStatus {
    /// Expiry date is today or later.
    Active,

    /// Expiry date has passed.
    Expired,
}

impl MemberStatus {
    /// Returns the label shown in the roster table.
    pub fn label(&self) -> &'static str {
        match self {
            MemberStatus::Active => "Active",
            MemberStatus::Expired => "Expired",
        }
    }
}

/// Field-level patch for editing a member.
///
/// Absent fields are left untouched. The expiry date cannot appear here:
/// it is derived.
#[derive(Debug, Clone, Default)]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub phone: Option<Phone>,
    pub plan: Option<MemberPlan>,
    pub join_date: Option<NaiveDate>,
    pub paid: Option<bool>,
}

/// Member aggregate - one person on a gym's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    /// Unique identifier for this member.
    pub id: MemberId,

    /// Account that owns this roster entry.
    pub owner_id: AccountId,

    /// Member's full name.
    pub name: String,

    /// Contact number, 10 digits.
    pub phone: Phone,

    /// Billing interval for this membership.
    pub plan: MemberPlan,

    /// Date the member joined.
    pub join_date: NaiveDate,

    /// Derived expiry date; kept consistent with `plan` and `join_date`.
    expiry_date: NaiveDate,

    /// Whether the current period has been marked as paid.
    pub paid: bool,
}

impl Member {
    /// Registers a new member. The expiry date is derived, never supplied.
    pub fn register(
        id: MemberId,
        owner_id: AccountId,
        name: impl Into<String>,
        phone: Phone,
        plan: MemberPlan,
        join_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            owner_id,
            name: name.into(),
            phone,
            plan,
            join_date,
            expiry_date: plan.derive_expiry(join_date),
            paid: false,
        }
    }

    /// Rebuilds a member from stored fields.
    ///
    /// The expiry date is recomputed rather than read back, so a row that
    /// drifted out of sync with its plan/join date is corrected on load.
    pub fn rehydrate(
        id: MemberId,
        owner_id: AccountId,
        name: String,
        phone: Phone,
        plan: MemberPlan,
        join_date: NaiveDate,
        paid: bool,
    ) -> Self {
        Self {
            id,
            owner_id,
            name,
            phone,
            plan,
            join_date,
            expiry_date: plan.derive_expiry(join_date),
            paid,
        }
    }

    /// Returns the derived expiry date.
    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    /// Applies an edit, recomputing the expiry date when the plan or join
    /// date changed.
    pub fn apply(&mut self, update: MemberUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(plan) = update.plan {
            self.plan = plan;
        }
        if let Some(join_date) = update.join_date {
            self.join_date = join_date;
        }
        if let Some(paid) = update.paid {
            self.paid = paid;
        }
        self.expiry_date = self.plan.derive_expiry(self.join_date);
    }

    /// Flips the paid flag.
    pub fn toggle_paid(&mut self) {
        self.paid = !self.paid;
    }

    /// Classifies this member on the given day.
    ///
    /// The boundary is inclusive on the active side: a member whose expiry
    /// date is today is still Active.
    pub fn status(&self, today: NaiveDate) -> MemberStatus {
        if self.expiry_date >= today {
            MemberStatus::Active
        } else {
            MemberStatus::Expired
        }
    }

    /// True when expiry is strictly in the future but less than seven days
    /// away, measured from `now` to midnight UTC of the expiry date.
    ///
    /// Already-expired members are excluded (strict lower bound), as is an
    /// expiry exactly seven days out (strict upper bound).
    pub fn expiring_soon(&self, now: Timestamp) -> bool {
        let expiry_midnight = Timestamp::from_datetime(
            self.expiry_date
                .and_hms_opt(0, 0, 0)
                .expect("midnight is always a valid time")
                .and_utc(),
        );
        let remaining = expiry_midnight.duration_since(&now);
        remaining > chrono::Duration::zero()
            && remaining < chrono::Duration::days(EXPIRY_WINDOW_DAYS)
    }

    /// True when the member joined in the given month of the given year.
    pub fn joined_in_month(&self, today: NaiveDate) -> bool {
        use chrono::Datelike;
        self.join_date.month() == today.month() && self.join_date.year() == today.year()
    }
}

impl OwnedByAccount for Member {
    fn owner_id(&self) -> &AccountId {
        &self.owner_id
    }
}
