//! HTTP adapter: axum routers, handlers, and DTOs.

pub mod account;
pub mod auth;
pub mod notify;
pub mod roster;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::domain::billing::CheckoutVerifier;
use crate::ports::{AccountStore, MemberRepository, NotificationGateway, PaymentRepository};

/// Shared application state: Arc-wrapped ports, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub account_store: Arc<dyn AccountStore>,
    pub members: Arc<dyn MemberRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub gateway: Arc<dyn NotificationGateway>,
    pub checkout_verifier: Arc<CheckoutVerifier>,
}

/// Standard error body returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Builds the complete application router.
///
/// `/api/*` carries the dashboard API; `/send-whatsapp` is the thin
/// notification endpoint kept at the root for compatibility with the
/// standalone reminder service it replaces.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/api/account", account::routes())
        .nest("/api", roster::routes())
        .merge(notify::routes())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
