//! Account command and query handlers.

mod confirm_subscription;
mod get_billing_status;
mod sign_up;

pub use confirm_subscription::{ConfirmSubscriptionCommand, ConfirmSubscriptionHandler};
pub use get_billing_status::{
    BillingStatusResult, GetBillingStatusHandler, GetBillingStatusQuery,
};
pub use sign_up::{SignUpCommand, SignUpHandler};
