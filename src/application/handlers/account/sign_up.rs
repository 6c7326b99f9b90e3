//! SignUpHandler - creates a gym-owner account with a fresh trial.

use std::sync::Arc;

use crate::domain::billing::{Account, BillingError};
use crate::domain::foundation::{AccountId, Timestamp};
use crate::ports::AccountStore;

/// Minimum password length accepted at sign-up.
const MIN_PASSWORD_LEN: usize = 6;

/// Command to register a new gym-owner account.
#[derive(Debug, Clone)]
pub struct SignUpCommand {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub gym_name: String,
}

/// Handler for account sign-up.
pub struct SignUpHandler {
    store: Arc<dyn AccountStore>,
}

impl SignUpHandler {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Creates the account with `trial_end = now + 14 days` and status
    /// Trial. Validation runs before any store write.
    pub async fn handle(&self, cmd: SignUpCommand) -> Result<Account, BillingError> {
        let email = cmd.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(BillingError::validation(
                "email",
                "Please enter a valid email address",
            ));
        }
        if cmd.password.len() < MIN_PASSWORD_LEN {
            return Err(BillingError::validation(
                "password",
                "Password must be at least 6 characters",
            ));
        }
        if cmd.full_name.trim().is_empty() {
            return Err(BillingError::validation("full_name", "Please enter your name"));
        }
        if cmd.gym_name.trim().is_empty() {
            return Err(BillingError::validation(
                "gym_name",
                "Please enter your gym's name",
            ));
        }

        let account = Account::sign_up(
            AccountId::new(),
            email,
            cmd.full_name.trim(),
            cmd.gym_name.trim(),
            Timestamp::now(),
        );

        self.store
            .sign_up(&account, &cmd.password)
            .await
            .map_err(|err| match BillingError::from(err) {
                BillingError::ValidationFailed { ref field, .. } if field == "email" => {
                    BillingError::email_taken(account.email.clone())
                }
                other => other,
            })?;

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAccountStore;
    use crate::domain::billing::SubscriptionStatus;

    fn handler() -> (SignUpHandler, Arc<InMemoryAccountStore>) {
        let store = Arc::new(InMemoryAccountStore::new());
        (SignUpHandler::new(store.clone()), store)
    }

    fn valid_command() -> SignUpCommand {
        SignUpCommand {
            email: "owner@ironworks.example".to_string(),
            password: "hunter22".to_string(),
            full_name: "Priya Nair".to_string(),
            gym_name: "Ironworks Gym".to_string(),
        }
    }

    #[tokio::test]
    async fn sign_up_starts_a_trial() {
        let (handler, _) = handler();

        let before = Timestamp::now();
        let account = handler.handle(valid_command()).await.unwrap();
        let after = Timestamp::now();

        assert_eq!(account.subscription_status, SubscriptionStatus::Trial);
        assert!(account.plan.is_none());

        let trial_end = account.trial_end.unwrap();
        assert!(trial_end >= before.add_days(14));
        assert!(trial_end <= after.add_days(14));
    }

    #[tokio::test]
    async fn email_is_normalized() {
        let (handler, _) = handler();
        let mut cmd = valid_command();
        cmd.email = "  Owner@Ironworks.Example ".to_string();

        let account = handler.handle(cmd).await.unwrap();
        assert_eq!(account.email, "owner@ironworks.example");
    }

    #[tokio::test]
    async fn account_is_persisted() {
        let (handler, store) = handler();
        let account = handler.handle(valid_command()).await.unwrap();

        let found = store.find_by_id(&account.id).await.unwrap();
        assert_eq!(found, Some(account));
    }

    #[tokio::test]
    async fn invalid_email_rejected_without_write() {
        let (handler, store) = handler();
        let mut cmd = valid_command();
        cmd.email = "not-an-email".to_string();

        let result = handler.handle(cmd).await;
        assert!(matches!(
            result,
            Err(BillingError::ValidationFailed { ref field, .. }) if field == "email"
        ));
        // Sign-in fails because nothing was written.
        assert!(store
            .sign_in("not-an-email", "hunter22")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn short_password_rejected() {
        let (handler, _) = handler();
        let mut cmd = valid_command();
        cmd.password = "short".to_string();

        let result = handler.handle(cmd).await;
        assert!(matches!(
            result,
            Err(BillingError::ValidationFailed { ref field, .. }) if field == "password"
        ));
    }

    #[tokio::test]
    async fn blank_gym_name_rejected() {
        let (handler, _) = handler();
        let mut cmd = valid_command();
        cmd.gym_name = "   ".to_string();

        assert!(handler.handle(cmd).await.is_err());
    }

    #[tokio::test]
    async fn duplicate_email_is_taken() {
        let (handler, _) = handler();
        handler.handle(valid_command()).await.unwrap();

        let result = handler.handle(valid_command()).await;
        assert!(matches!(result, Err(BillingError::EmailTaken(_))));
    }
}
