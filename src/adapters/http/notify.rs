//! Thin notification endpoint.
//!
//! `POST /send-whatsapp` with `{phone, name, expiry_date}` - the minimal
//! outward contract of the standalone reminder service this replaces. All
//! three fields are required; the endpoint forwards to the WhatsApp
//! gateway and has no other side effects.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::roster::Phone;

use super::{AppState, ErrorResponse};

#[derive(Debug, Deserialize)]
pub struct SendWhatsAppRequest {
    pub phone: Option<String>,
    pub name: Option<String>,
    pub expiry_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct SendWhatsAppResponse {
    pub sent: bool,
}

/// POST /send-whatsapp
pub async fn send_whatsapp(
    State(state): State<AppState>,
    Json(request): Json<SendWhatsAppRequest>,
) -> impl IntoResponse {
    let (phone, name, expiry_date) = match (request.phone, request.name, request.expiry_date) {
        (Some(phone), Some(name), Some(expiry)) if !name.trim().is_empty() => {
            (phone, name, expiry)
        }
        _ => {
            let body = ErrorResponse::new("VALIDATION_FAILED", "Missing required fields");
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    let phone = match Phone::try_new(phone) {
        Ok(phone) => phone,
        Err(err) => {
            let body = ErrorResponse::new("VALIDATION_FAILED", err.to_string());
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    match state.gateway.send_whatsapp(&phone, &name, expiry_date).await {
        Ok(()) => Json(SendWhatsAppResponse { sent: true }).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "whatsapp reminder failed");
            let body = ErrorResponse::new("GATEWAY_FAILED", "Failed to send WhatsApp message");
            (StatusCode::BAD_GATEWAY, Json(body)).into_response()
        }
    }
}

/// Create the notification router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/send-whatsapp", post(send_whatsapp))
}
