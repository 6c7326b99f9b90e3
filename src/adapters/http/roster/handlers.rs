//! HTTP handlers for roster endpoints.
//!
//! Every handler re-checks billing access from live account state before
//! touching roster data, and every mutation responds with a freshly
//! refetched snapshot so clients never render stale aggregates.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::roster::{
    DeleteMemberCommand, DeleteMemberHandler, RecordPaymentCommand, RecordPaymentHandler,
    RefreshDashboardHandler, RefreshDashboardQuery, RegisterMemberCommand,
    RegisterMemberHandler, ReminderError, RosterSnapshot, SendExpiryReminderCommand,
    SendExpiryReminderHandler, UpdateMemberCommand, UpdateMemberHandler,
};
use crate::domain::foundation::{AccountId, MemberId, Timestamp};
use crate::domain::roster::{filter_members, filter_payments, Amount, RosterError};
use crate::ports::GatewayError;

use super::super::auth::{require_access, AccessError, AuthenticatedAccount};
use super::super::{AppState, ErrorResponse};
use super::dto::{
    MemberResponse, MetricsResponse, PaymentResponse, RecordPaymentRequest,
    RegisterMemberRequest, ReminderResponse, SendReminderRequest, SetPaidRequest,
    SnapshotResponse, UpdateMemberRequest,
};

async fn refresh(state: &AppState, owner_id: AccountId) -> Result<RosterSnapshot, RosterError> {
    RefreshDashboardHandler::new(state.members.clone(), state.payments.clone())
        .handle(RefreshDashboardQuery { owner_id })
        .await
}

/// GET /api/members?search= - List (optionally filtered) members.
pub async fn list_members(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    Query(query): Query<super::dto::SearchQuery>,
) -> Result<impl IntoResponse, RosterApiError> {
    require_access(&state, &account.account_id).await?;

    let snapshot = refresh(&state, account.account_id).await?;
    let now = Timestamp::now();
    let filtered = filter_members(&snapshot.members, query.search.as_deref().unwrap_or(""));

    let members: Vec<MemberResponse> = filtered
        .into_iter()
        .map(|m| MemberResponse::from_member(m, now))
        .collect();
    Ok(Json(members))
}

/// POST /api/members - Register a member.
pub async fn register_member(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    Json(request): Json<RegisterMemberRequest>,
) -> Result<impl IntoResponse, RosterApiError> {
    require_access(&state, &account.account_id).await?;

    RegisterMemberHandler::new(state.members.clone())
        .handle(RegisterMemberCommand {
            owner_id: account.account_id,
            name: request.name,
            phone: request.phone,
            plan: request.plan,
            join_date: request.join_date,
        })
        .await?;

    let snapshot = refresh(&state, account.account_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(SnapshotResponse::from_snapshot(&snapshot, Timestamp::now())),
    ))
}

/// PATCH /api/members/:id - Edit a member.
pub async fn update_member(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    Path(id): Path<String>,
    Json(request): Json<UpdateMemberRequest>,
) -> Result<impl IntoResponse, RosterApiError> {
    require_access(&state, &account.account_id).await?;
    let member_id = parse_member_id(&id)?;

    UpdateMemberHandler::new(state.members.clone())
        .handle(UpdateMemberCommand {
            owner_id: account.account_id,
            member_id,
            name: request.name,
            phone: request.phone,
            plan: request.plan,
            join_date: request.join_date,
            paid: request.paid,
        })
        .await?;

    let snapshot = refresh(&state, account.account_id).await?;
    Ok(Json(SnapshotResponse::from_snapshot(&snapshot, Timestamp::now())))
}

/// POST /api/members/:id/paid - Set the paid flag.
pub async fn set_member_paid(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    Path(id): Path<String>,
    Json(request): Json<SetPaidRequest>,
) -> Result<impl IntoResponse, RosterApiError> {
    require_access(&state, &account.account_id).await?;
    let member_id = parse_member_id(&id)?;

    UpdateMemberHandler::new(state.members.clone())
        .handle(UpdateMemberCommand::toggle_paid(
            account.account_id,
            member_id,
            request.paid,
        ))
        .await?;

    let snapshot = refresh(&state, account.account_id).await?;
    Ok(Json(SnapshotResponse::from_snapshot(&snapshot, Timestamp::now())))
}

/// DELETE /api/members/:id - Remove a member.
pub async fn delete_member(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, RosterApiError> {
    require_access(&state, &account.account_id).await?;
    let member_id = parse_member_id(&id)?;

    DeleteMemberHandler::new(state.members.clone())
        .handle(DeleteMemberCommand {
            owner_id: account.account_id,
            member_id,
        })
        .await?;

    let snapshot = refresh(&state, account.account_id).await?;
    Ok(Json(SnapshotResponse::from_snapshot(&snapshot, Timestamp::now())))
}

/// POST /api/members/:id/remind - Send an expiry reminder.
pub async fn send_reminder(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    Path(id): Path<String>,
    Json(request): Json<SendReminderRequest>,
) -> Result<impl IntoResponse, RosterApiError> {
    require_access(&state, &account.account_id).await?;
    let member_id = parse_member_id(&id)?;

    SendExpiryReminderHandler::new(state.members.clone(), state.gateway.clone())
        .handle(SendExpiryReminderCommand {
            owner_id: account.account_id,
            member_id,
            email: request.email,
        })
        .await?;

    Ok(Json(ReminderResponse { sent: true }))
}

/// GET /api/payments?search= - List (optionally filtered) payments.
pub async fn list_payments(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    Query(query): Query<super::dto::SearchQuery>,
) -> Result<impl IntoResponse, RosterApiError> {
    require_access(&state, &account.account_id).await?;

    let snapshot = refresh(&state, account.account_id).await?;
    let filtered = filter_payments(&snapshot.payments, query.search.as_deref().unwrap_or(""));

    let payments: Vec<PaymentResponse> =
        filtered.into_iter().map(PaymentResponse::from).collect();
    Ok(Json(payments))
}

/// POST /api/payments - Record a payment.
pub async fn record_payment(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<impl IntoResponse, RosterApiError> {
    require_access(&state, &account.account_id).await?;

    // An empty selection arrives as "" or null; both mean none.
    let member_id = match request.member_id.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(parse_member_id(raw)?),
    };

    let amount = Amount::parse(&request.amount)
        .map_err(|_| RosterError::validation("amount", "Please enter a valid amount"))?;

    RecordPaymentHandler::new(state.members.clone(), state.payments.clone())
        .handle(RecordPaymentCommand {
            owner_id: account.account_id,
            member_id,
            amount_minor_units: amount.minor_units(),
            method: request.method,
        })
        .await?;

    let snapshot = refresh(&state, account.account_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(SnapshotResponse::from_snapshot(&snapshot, Timestamp::now())),
    ))
}

/// GET /api/dashboard - Aggregate metrics.
pub async fn get_dashboard(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
) -> Result<impl IntoResponse, RosterApiError> {
    require_access(&state, &account.account_id).await?;

    let snapshot = refresh(&state, account.account_id).await?;
    Ok(Json(MetricsResponse::from(snapshot.metrics)))
}

fn parse_member_id(raw: &str) -> Result<MemberId, RosterError> {
    raw.parse()
        .map_err(|_| RosterError::validation("member_id", "Invalid member id"))
}

/// API error type converting roster, gateway, and access errors to HTTP
/// responses.
pub enum RosterApiError {
    Access(AccessError),
    Roster(RosterError),
    Gateway(GatewayError),
}

impl From<AccessError> for RosterApiError {
    fn from(err: AccessError) -> Self {
        Self::Access(err)
    }
}

impl From<RosterError> for RosterApiError {
    fn from(err: RosterError) -> Self {
        Self::Roster(err)
    }
}

impl From<ReminderError> for RosterApiError {
    fn from(err: ReminderError) -> Self {
        match err {
            ReminderError::Roster(e) => Self::Roster(e),
            ReminderError::Gateway(e) => Self::Gateway(e),
        }
    }
}

impl IntoResponse for RosterApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            RosterApiError::Access(err) => err.into_response(),
            RosterApiError::Roster(err) => {
                let status = match &err {
                    RosterError::MemberNotFound(_) => StatusCode::NOT_FOUND,
                    RosterError::Forbidden => StatusCode::FORBIDDEN,
                    RosterError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
                    RosterError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                let body = ErrorResponse::new(err.code().to_string(), err.message());
                (status, Json(body)).into_response()
            }
            RosterApiError::Gateway(err) => {
                let body = ErrorResponse::new("GATEWAY_FAILED", err.to_string());
                (StatusCode::BAD_GATEWAY, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_not_found_maps_to_404() {
        let err = RosterApiError::Roster(RosterError::member_not_found(MemberId::new()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let err = RosterApiError::Roster(RosterError::validation("phone", "bad"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let err = RosterApiError::Roster(RosterError::Forbidden);
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn gateway_failure_maps_to_502() {
        let err = RosterApiError::Gateway(GatewayError::Unreachable("down".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn access_denial_maps_to_402() {
        let err = RosterApiError::Access(AccessError::SubscriptionRequired);
        assert_eq!(err.into_response().status(), StatusCode::PAYMENT_REQUIRED);
    }

    #[test]
    fn bad_member_id_is_a_validation_error() {
        assert!(parse_member_id("not-a-uuid").is_err());
        assert!(parse_member_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
    }
}
