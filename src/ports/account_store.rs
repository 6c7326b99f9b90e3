//! Account store port.
//!
//! Contract for the hosted identity/metadata backend: credential handling,
//! opaque session tokens, and account metadata updates. The store is the
//! single source of truth for account state; the domain never caches it
//! between requests.

use async_trait::async_trait;

use crate::domain::billing::{Account, SubscriptionPlan};
use crate::domain::foundation::{AccountId, DomainError, Timestamp};

/// An authenticated session resolved from an opaque token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque bearer token presented by the client.
    pub token: String,

    /// Account the token belongs to.
    pub account_id: AccountId,
}

/// Port for identity, session, and account-metadata operations.
///
/// Implementations must:
/// - Enforce email uniqueness on sign-up
/// - Treat `update_subscription` as the only metadata write path after
///   sign-up; `trial_end` is immutable by contract
/// - Never reveal whether a reset-password email exists
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Creates the account and its credentials.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if an account already exists for the email
    /// - `DatabaseError` on persistence failure
    async fn sign_up(&self, account: &Account, password: &str) -> Result<(), DomainError>;

    /// Verifies credentials and opens a session.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` when the email/password pair does not match
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, DomainError>;

    /// Resolves a bearer token to a live session.
    ///
    /// Returns `None` for unknown or signed-out tokens.
    async fn session(&self, token: &str) -> Result<Option<Session>, DomainError>;

    /// Revokes a session token. Unknown tokens are a no-op.
    async fn sign_out(&self, token: &str) -> Result<(), DomainError>;

    /// Loads an account by id. Returns `None` if absent.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError>;

    /// Marks the account as subscribed to `plan` as of `subscribed_at`.
    ///
    /// Must leave every other metadata field, `trial_end` above all,
    /// untouched.
    async fn update_subscription(
        &self,
        id: &AccountId,
        plan: SubscriptionPlan,
        subscribed_at: Timestamp,
    ) -> Result<(), DomainError>;

    /// Triggers a password-reset email. Always succeeds for well-formed
    /// input regardless of whether the email is registered.
    async fn reset_password(&self, email: &str) -> Result<(), DomainError>;
}
