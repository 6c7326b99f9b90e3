//! Axum router for roster endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::super::AppState;
use super::handlers::{
    delete_member, get_dashboard, list_members, list_payments, record_payment,
    register_member, send_reminder, set_member_paid, update_member,
};

/// Create the roster API router.
///
/// All routes require a session and live billing access.
///
/// # Routes
/// - `GET /members` / `POST /members`
/// - `PATCH /members/:id` / `DELETE /members/:id`
/// - `POST /members/:id/paid` - Set the paid flag
/// - `POST /members/:id/remind` - Send an expiry reminder
/// - `GET /payments` / `POST /payments`
/// - `GET /dashboard` - Aggregate metrics
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/members", get(list_members).post(register_member))
        .route("/members/:id", patch(update_member).delete(delete_member))
        .route("/members/:id/paid", post(set_member_paid))
        .route("/members/:id/remind", post(send_reminder))
        .route("/payments", get(list_payments).post(record_payment))
        .route("/dashboard", get(get_dashboard))
}
