//! Roster domain: members, payments, metrics, and search.

mod amount;
mod errors;
mod member;
mod metrics;
mod payment;
mod phone;
mod plan;
mod search;

pub use amount::{total_minor_units, Amount};
pub use errors::RosterError;
pub use member::{Member, MemberStatus, MemberUpdate, EXPIRY_WINDOW_DAYS};
pub use metrics::DashboardMetrics;
pub use payment::{Payment, PaymentMethod, PaymentWithMember};
pub use phone::Phone;
pub use plan::MemberPlan;
pub use search::{filter_members, filter_payments};
