//! Billing domain: accounts, subscription plans, and checkout verification.
//!
//! The classifier in [`account`] is the access-gating core: every protected
//! operation re-derives trial/subscription state from the live account
//! record.

mod account;
mod checkout;
mod errors;
mod plan;

pub use account::{Account, BillingSnapshot, SubscriptionStatus, TRIAL_DAYS};
#[cfg(test)]
pub use checkout::compute_test_signature;
pub use checkout::{CheckoutConfirmation, CheckoutVerifier};
pub use errors::BillingError;
pub use plan::SubscriptionPlan;
