//! Request/response DTOs for account endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::account::BillingStatusResult;
use crate::domain::billing::{Account, SubscriptionPlan, SubscriptionStatus};
use crate::domain::foundation::Timestamp;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub gym_name: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmSubscriptionRequest {
    pub plan: SubscriptionPlan,
    pub payment_id: String,
    pub order_id: String,
    pub signature: String,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub gym_name: String,
    pub trial_end: Option<Timestamp>,
    pub subscription_status: SubscriptionStatus,
    pub plan: Option<SubscriptionPlan>,
    pub subscribed_at: Option<Timestamp>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email,
            full_name: account.full_name,
            gym_name: account.gym_name,
            trial_end: account.trial_end,
            subscription_status: account.subscription_status,
            plan: account.plan,
            subscribed_at: account.subscribed_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub account: AccountResponse,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct BillingStatusResponse {
    pub gym_name: String,
    pub trial_active: bool,
    pub subscribed: bool,
    pub plan: Option<SubscriptionPlan>,
    pub display_label: String,
    pub has_access: bool,
}

impl From<BillingStatusResult> for BillingStatusResponse {
    fn from(result: BillingStatusResult) -> Self {
        Self {
            gym_name: result.gym_name,
            trial_active: result.snapshot.trial_active,
            subscribed: result.snapshot.subscribed,
            plan: result.snapshot.plan,
            display_label: result.snapshot.display_label,
            has_access: result.snapshot.has_access,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
