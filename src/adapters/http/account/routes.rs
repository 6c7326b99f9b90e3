//! Axum router for account endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::AppState;
use super::handlers::{
    confirm_subscription, get_billing_status, reset_password, sign_in, sign_out, sign_up,
};

/// Create the account API router.
///
/// # Routes
///
/// ## Public
/// - `POST /signup` - Register and open a session
/// - `POST /signin` - Exchange credentials for a token
/// - `POST /reset-password` - Trigger a reset email
///
/// ## Authenticated
/// - `POST /signout` - Revoke the current session
/// - `GET /billing` - Classify the live billing state
/// - `POST /subscription/confirm` - Activate after a verified checkout
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in))
        .route("/signout", post(sign_out))
        .route("/reset-password", post(reset_password))
        .route("/billing", get(get_billing_status))
        .route("/subscription/confirm", post(confirm_subscription))
}
