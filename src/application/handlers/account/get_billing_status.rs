//! GetBillingStatusHandler - classifies the live account state.
//!
//! This is the query behind every access decision: it always reads the
//! account fresh from the store, so a subscription change or trial expiry
//! is reflected on the very next request.

use std::sync::Arc;

use crate::domain::billing::{BillingError, BillingSnapshot};
use crate::domain::foundation::{AccountId, Timestamp};
use crate::ports::AccountStore;

/// Query for an account's billing state.
#[derive(Debug, Clone)]
pub struct GetBillingStatusQuery {
    pub account_id: AccountId,
}

/// Result of the billing-status query.
#[derive(Debug, Clone)]
pub struct BillingStatusResult {
    pub gym_name: String,
    pub snapshot: BillingSnapshot,
}

/// Handler for billing classification.
pub struct GetBillingStatusHandler {
    store: Arc<dyn AccountStore>,
}

impl GetBillingStatusHandler {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// # Errors
    ///
    /// - `AccountNotFound` when the id does not resolve
    /// - `MetadataMissing` when the record lacks `trial_end`; callers must
    ///   treat that as sign-out-and-retry, not as an expired trial
    pub async fn handle(
        &self,
        query: GetBillingStatusQuery,
    ) -> Result<BillingStatusResult, BillingError> {
        let account = self
            .store
            .find_by_id(&query.account_id)
            .await
            .map_err(BillingError::from)?
            .ok_or(BillingError::AccountNotFound(query.account_id))?;

        let snapshot = account.billing_snapshot(Timestamp::now())?;

        Ok(BillingStatusResult {
            gym_name: account.gym_name,
            snapshot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAccountStore;
    use crate::domain::billing::Account;

    fn setup(account: Account) -> GetBillingStatusHandler {
        let store = Arc::new(InMemoryAccountStore::new());
        store.seed(account);
        GetBillingStatusHandler::new(store)
    }

    #[tokio::test]
    async fn fresh_account_is_on_trial() {
        let account = Account::sign_up(
            AccountId::new(),
            "owner@gym.example",
            "Owner",
            "Iron Temple",
            Timestamp::now(),
        );
        let id = account.id;
        let handler = setup(account);

        let result = handler
            .handle(GetBillingStatusQuery { account_id: id })
            .await
            .unwrap();

        assert!(result.snapshot.trial_active);
        assert!(result.snapshot.has_access);
        assert_eq!(result.gym_name, "Iron Temple");
        assert_eq!(result.snapshot.display_label, "Trial (Pro)");
    }

    #[tokio::test]
    async fn lapsed_trial_has_no_access() {
        let mut account = Account::sign_up(
            AccountId::new(),
            "owner@gym.example",
            "Owner",
            "Iron Temple",
            Timestamp::now(),
        );
        account.trial_end = Some(Timestamp::now().minus_days(1));
        let id = account.id;
        let handler = setup(account);

        let result = handler
            .handle(GetBillingStatusQuery { account_id: id })
            .await
            .unwrap();

        assert!(!result.snapshot.trial_active);
        assert!(!result.snapshot.has_access);
        assert_eq!(result.snapshot.display_label, "Free");
    }

    #[tokio::test]
    async fn missing_trial_end_is_metadata_error() {
        let mut account = Account::sign_up(
            AccountId::new(),
            "owner@gym.example",
            "Owner",
            "Iron Temple",
            Timestamp::now(),
        );
        account.trial_end = None;
        let id = account.id;
        let handler = setup(account);

        let result = handler.handle(GetBillingStatusQuery { account_id: id }).await;
        assert!(matches!(result, Err(BillingError::MetadataMissing(_))));
    }

    #[tokio::test]
    async fn unknown_account_is_not_found() {
        let handler = GetBillingStatusHandler::new(Arc::new(InMemoryAccountStore::new()));

        let result = handler
            .handle(GetBillingStatusQuery {
                account_id: AccountId::new(),
            })
            .await;

        assert!(matches!(result, Err(BillingError::AccountNotFound(_))));
    }
}
