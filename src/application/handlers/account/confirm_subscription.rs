//! ConfirmSubscriptionHandler - activates a paid subscription from a
//! verified checkout confirmation.
//!
//! The signature is verified before anything is read or written; an
//! unverified confirmation must leave the account untouched.

use std::sync::Arc;

use crate::domain::billing::{
    Account, BillingError, CheckoutConfirmation, CheckoutVerifier, SubscriptionPlan,
};
use crate::domain::foundation::{AccountId, Timestamp};
use crate::ports::AccountStore;

/// Command to activate a subscription after checkout.
#[derive(Debug, Clone)]
pub struct ConfirmSubscriptionCommand {
    pub account_id: AccountId,
    pub plan: SubscriptionPlan,
    pub confirmation: CheckoutConfirmation,
}

/// Handler for subscription activation.
pub struct ConfirmSubscriptionHandler {
    store: Arc<dyn AccountStore>,
    verifier: Arc<CheckoutVerifier>,
}

impl ConfirmSubscriptionHandler {
    pub fn new(store: Arc<dyn AccountStore>, verifier: Arc<CheckoutVerifier>) -> Self {
        Self { store, verifier }
    }

    /// Verifies the confirmation signature, then flips the account to an
    /// active subscription on `plan`.
    ///
    /// # Errors
    ///
    /// - `InvalidSignature` before any store access on a bad confirmation
    /// - `AccountNotFound` when the account id does not resolve
    pub async fn handle(&self, cmd: ConfirmSubscriptionCommand) -> Result<Account, BillingError> {
        self.verifier.verify(&cmd.confirmation)?;

        let mut account = self
            .store
            .find_by_id(&cmd.account_id)
            .await
            .map_err(BillingError::from)?
            .ok_or(BillingError::AccountNotFound(cmd.account_id))?;

        let now = Timestamp::now();
        self.store
            .update_subscription(&cmd.account_id, cmd.plan, now)
            .await
            .map_err(BillingError::from)?;

        account.activate_subscription(cmd.plan, now);

        tracing::info!(
            account_id = %account.id,
            plan = %cmd.plan,
            "subscription activated"
        );

        Ok(account)
    }
}
