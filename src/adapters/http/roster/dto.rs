//! Request/response DTOs for roster endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::roster::RosterSnapshot;
use crate::domain::foundation::Timestamp;
use crate::domain::roster::{
    DashboardMetrics, Member, MemberPlan, PaymentMethod, PaymentWithMember,
};

#[derive(Debug, Deserialize)]
pub struct RegisterMemberRequest {
    pub name: String,
    pub phone: String,
    pub plan: MemberPlan,
    /// Defaults to today when omitted.
    pub join_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateMemberRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub plan: Option<MemberPlan>,
    pub join_date: Option<NaiveDate>,
    pub paid: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct SetPaidRequest {
    pub paid: bool,
}

#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    /// Empty string and null both mean "nothing selected".
    pub member_id: Option<String>,
    /// Decimal string, e.g. `"499"` or `"0.01"`. Kept as a string so the
    /// money path never passes through floating point.
    pub amount: String,
    pub method: Option<PaymentMethod>,
}

#[derive(Debug, Deserialize)]
pub struct SendReminderRequest {
    /// Optional email address; WhatsApp alone when absent.
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub plan: MemberPlan,
    pub join_date: NaiveDate,
    pub expiry_date: NaiveDate,
    /// "Active" or "Expired" at render time.
    pub status: &'static str,
    pub paid: bool,
}

impl MemberResponse {
    pub fn from_member(member: &Member, now: Timestamp) -> Self {
        Self {
            id: member.id.to_string(),
            name: member.name.clone(),
            phone: member.phone.as_str().to_string(),
            plan: member.plan,
            join_date: member.join_date,
            expiry_date: member.expiry_date(),
            status: member.status(now.date_utc()).label(),
            paid: member.paid,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: String,
    pub member_name: Option<String>,
    pub member_phone: Option<String>,
    pub amount_minor_units: i64,
    /// Decimal rendering, e.g. `"499"` or `"499.50"`.
    pub amount: String,
    pub method: &'static str,
    pub recorded_at: Timestamp,
}

impl From<&PaymentWithMember> for PaymentResponse {
    fn from(row: &PaymentWithMember) -> Self {
        Self {
            id: row.payment.id.to_string(),
            member_name: row.member_name.clone(),
            member_phone: row.member_phone.as_ref().map(|p| p.as_str().to_string()),
            amount_minor_units: row.payment.amount.minor_units(),
            amount: row.payment.amount.to_decimal_string(),
            method: row.payment.method.display_name(),
            recorded_at: row.payment.recorded_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub total_revenue_minor_units: i64,
    pub total_members: usize,
    pub active_members: usize,
    pub new_joinees: usize,
    pub expiring_soon: usize,
}

impl From<DashboardMetrics> for MetricsResponse {
    fn from(metrics: DashboardMetrics) -> Self {
        Self {
            total_revenue_minor_units: metrics.total_revenue_minor_units,
            total_members: metrics.total_members,
            active_members: metrics.active_members,
            new_joinees: metrics.new_joinees,
            expiring_soon: metrics.expiring_soon,
        }
    }
}

/// Full refreshed snapshot returned by every mutating roster endpoint.
#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub members: Vec<MemberResponse>,
    pub payments: Vec<PaymentResponse>,
    pub metrics: MetricsResponse,
}

impl SnapshotResponse {
    pub fn from_snapshot(snapshot: &RosterSnapshot, now: Timestamp) -> Self {
        Self {
            members: snapshot
                .members
                .iter()
                .map(|m| MemberResponse::from_member(m, now))
                .collect(),
            payments: snapshot.payments.iter().map(PaymentResponse::from).collect(),
            metrics: MetricsResponse::from(snapshot.metrics),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReminderResponse {
    pub sent: bool,
}
