//! HTTP handlers for account endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::account::{
    ConfirmSubscriptionCommand, ConfirmSubscriptionHandler, GetBillingStatusHandler,
    GetBillingStatusQuery, SignUpCommand, SignUpHandler,
};
use crate::domain::billing::{BillingError, CheckoutConfirmation};

use super::super::auth::AuthenticatedAccount;
use super::super::{AppState, ErrorResponse};
use super::dto::{
    AccountResponse, BillingStatusResponse, ConfirmSubscriptionRequest, MessageResponse,
    ResetPasswordRequest, SessionResponse, SignInRequest, SignInResponse, SignUpRequest,
};

/// POST /api/account/signup - Register a gym owner and open a session.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<impl IntoResponse, AccountApiError> {
    let handler = SignUpHandler::new(state.account_store.clone());
    let account = handler
        .handle(SignUpCommand {
            email: request.email,
            password: request.password.clone(),
            full_name: request.full_name,
            gym_name: request.gym_name,
        })
        .await?;

    // Open a session right away so the dashboard can load without a second
    // login round-trip.
    let session = state
        .account_store
        .sign_in(&account.email, &request.password)
        .await
        .map_err(BillingError::from)?;

    let response = SessionResponse {
        token: session.token,
        account: AccountResponse::from(account),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/account/signin - Exchange credentials for a session token.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<impl IntoResponse, AccountApiError> {
    let session = state
        .account_store
        .sign_in(&request.email, &request.password)
        .await
        .map_err(BillingError::from)?;

    Ok(Json(SignInResponse {
        token: session.token,
    }))
}

/// POST /api/account/signout - Revoke the current session.
pub async fn sign_out(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
) -> Result<impl IntoResponse, AccountApiError> {
    state
        .account_store
        .sign_out(&account.token)
        .await
        .map_err(BillingError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/account/reset-password - Trigger a reset email.
///
/// Responds identically whether or not the email is registered.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AccountApiError> {
    state
        .account_store
        .reset_password(&request.email)
        .await
        .map_err(BillingError::from)?;

    Ok(Json(MessageResponse {
        message: "If that email exists, a password reset link has been sent.".to_string(),
    }))
}

/// GET /api/account/billing - Classify the live billing state.
pub async fn get_billing_status(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
) -> Result<impl IntoResponse, AccountApiError> {
    let handler = GetBillingStatusHandler::new(state.account_store.clone());
    let result = handler
        .handle(GetBillingStatusQuery {
            account_id: account.account_id,
        })
        .await?;

    Ok(Json(BillingStatusResponse::from(result)))
}

/// POST /api/account/subscription/confirm - Activate after checkout.
pub async fn confirm_subscription(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    Json(request): Json<ConfirmSubscriptionRequest>,
) -> Result<impl IntoResponse, AccountApiError> {
    let handler = ConfirmSubscriptionHandler::new(
        state.account_store.clone(),
        state.checkout_verifier.clone(),
    );
    let updated = handler
        .handle(ConfirmSubscriptionCommand {
            account_id: account.account_id,
            plan: request.plan,
            confirmation: CheckoutConfirmation {
                payment_id: request.payment_id,
                order_id: request.order_id,
                signature: request.signature,
            },
        })
        .await?;

    Ok(Json(AccountResponse::from(updated)))
}

/// API error type converting billing errors to HTTP responses.
pub struct AccountApiError(BillingError);

impl From<BillingError> for AccountApiError {
    fn from(err: BillingError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AccountApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            BillingError::AccountNotFound(_) => StatusCode::NOT_FOUND,
            BillingError::EmailTaken(_) => StatusCode::CONFLICT,
            BillingError::MetadataMissing(_) => StatusCode::FORBIDDEN,
            BillingError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            BillingError::InvalidSignature => StatusCode::UNAUTHORIZED,
            BillingError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            BillingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::AccountId;

    #[test]
    fn invalid_signature_maps_to_401() {
        let response = AccountApiError(BillingError::InvalidSignature).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn metadata_missing_maps_to_403() {
        let response =
            AccountApiError(BillingError::metadata_missing(AccountId::new())).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn validation_maps_to_400() {
        let response =
            AccountApiError(BillingError::validation("email", "bad")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_credentials_maps_to_401() {
        let response = AccountApiError(BillingError::InvalidCredentials).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn store_failure_maps_to_500() {
        let response = AccountApiError(BillingError::store("down")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
