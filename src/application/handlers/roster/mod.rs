//! Roster command and query handlers.

mod delete_member;
mod record_payment;
mod refresh_dashboard;
mod register_member;
mod send_expiry_reminder;
mod update_member;

pub use delete_member::{DeleteMemberCommand, DeleteMemberHandler};
pub use record_payment::{RecordPaymentCommand, RecordPaymentHandler};
pub use refresh_dashboard::{RefreshDashboardHandler, RefreshDashboardQuery, RosterSnapshot};
pub use register_member::{RegisterMemberCommand, RegisterMemberHandler};
pub use send_expiry_reminder::{
    ReminderError, SendExpiryReminderCommand, SendExpiryReminderHandler,
};
pub use update_member::{UpdateMemberCommand, UpdateMemberHandler};
