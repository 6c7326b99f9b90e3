//! Request authentication and access gating.
//!
//! `AuthenticatedAccount` resolves the bearer token against the account
//! store on every request; there is no token cache. `require_access`
//! additionally re-evaluates the billing classifier from the live account
//! record, so a lapsed trial locks the roster out on the very next call.

use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::billing::BillingError;
use crate::domain::foundation::{AccountId, Timestamp};

use super::{AppState, ErrorResponse};

/// The account resolved from the request's bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
    pub token: String,
}

/// Rejection for failed authentication.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new("UNAUTHORIZED", "Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthenticatedAccount {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AuthRejection)?;

        let session = state
            .account_store
            .session(token)
            .await
            .map_err(|_| AuthRejection)?
            .ok_or(AuthRejection)?;

        Ok(AuthenticatedAccount {
            account_id: session.account_id,
            token: token.to_string(),
        })
    }
}

/// Error from the access gate.
pub enum AccessError {
    /// Trial over and no subscription: the caller must present the
    /// upgrade path.
    SubscriptionRequired,

    /// Account metadata incomplete: sign-out-and-retry, never an ungated
    /// render.
    ProfileIncomplete,

    /// Account vanished or the store failed.
    Other(BillingError),
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AccessError::SubscriptionRequired => (
                StatusCode::PAYMENT_REQUIRED,
                "SUBSCRIPTION_REQUIRED",
                "Your free trial has ended. Please subscribe to continue using all services."
                    .to_string(),
            ),
            AccessError::ProfileIncomplete => (
                StatusCode::FORBIDDEN,
                "ACCOUNT_PROFILE_INCOMPLETE",
                "Account profile is incomplete. Please log out and log in again.".to_string(),
            ),
            AccessError::Other(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                err.message(),
            ),
        };
        let body = ErrorResponse::new(code, message);
        (status, Json(body)).into_response()
    }
}

/// Re-evaluates roster access from the live account record.
///
/// Called by every roster/payment/dashboard handler before touching data.
pub async fn require_access(
    state: &AppState,
    account_id: &AccountId,
) -> Result<(), AccessError> {
    let account = state
        .account_store
        .find_by_id(account_id)
        .await
        .map_err(|e| AccessError::Other(BillingError::from(e)))?
        .ok_or_else(|| AccessError::Other(BillingError::AccountNotFound(*account_id)))?;

    let snapshot = account
        .billing_snapshot(Timestamp::now())
        .map_err(|err| match err {
            BillingError::MetadataMissing(_) => AccessError::ProfileIncomplete,
            other => AccessError::Other(other),
        })?;

    if snapshot.has_access {
        Ok(())
    } else {
        Err(AccessError::SubscriptionRequired)
    }
}
