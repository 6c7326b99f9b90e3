//! PostgreSQL implementation of AccountStore.
//!
//! Credentials are stored as Argon2id hashes; session tokens are random
//! UUIDs held in their own table. Password reset delivery is out of scope
//! here, so `reset_password` only logs the request.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::{Account, SubscriptionPlan, SubscriptionStatus};
use crate::domain::foundation::{AccountId, DomainError, ErrorCode, Timestamp};
use crate::ports::{AccountStore, Session};

/// PostgreSQL implementation of the AccountStore port.
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an account.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    full_name: String,
    gym_name: String,
    trial_end: Option<DateTime<Utc>>,
    subscription_status: String,
    plan: Option<String>,
    subscribed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = DomainError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId::from_uuid(row.id),
            email: row.email,
            full_name: row.full_name,
            gym_name: row.gym_name,
            trial_end: row.trial_end.map(Timestamp::from_datetime),
            subscription_status: parse_status(&row.subscription_status)?,
            plan: row.plan.as_deref().map(parse_plan).transpose()?,
            subscribed_at: row.subscribed_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn parse_status(s: &str) -> Result<SubscriptionStatus, DomainError> {
    match s.to_lowercase().as_str() {
        "trial" => Ok(SubscriptionStatus::Trial),
        "active" => Ok(SubscriptionStatus::Active),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid subscription status: {}", s),
        )),
    }
}

fn status_to_string(status: &SubscriptionStatus) -> &'static str {
    match status {
        SubscriptionStatus::Trial => "trial",
        SubscriptionStatus::Active => "active",
    }
}

fn parse_plan(s: &str) -> Result<SubscriptionPlan, DomainError> {
    match s.to_lowercase().as_str() {
        "monthly" => Ok(SubscriptionPlan::Monthly),
        "six_months" => Ok(SubscriptionPlan::SixMonths),
        "annual" => Ok(SubscriptionPlan::Annual),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid plan value: {}", s),
        )),
    }
}

fn plan_to_string(plan: &SubscriptionPlan) -> &'static str {
    match plan {
        SubscriptionPlan::Monthly => "monthly",
        SubscriptionPlan::SixMonths => "six_months",
        SubscriptionPlan::Annual => "annual",
    }
}

fn db_error(err: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, err.to_string())
}

fn invalid_credentials() -> DomainError {
    DomainError::new(ErrorCode::InvalidCredentials, "Invalid email or password")
}

const SELECT_ACCOUNT: &str = r#"
    SELECT id, email, full_name, gym_name, trial_end, subscription_status,
           plan, subscribed_at, created_at
    FROM accounts
"#;

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn sign_up(&self, account: &Account, password: &str) -> Result<(), DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?
            .to_string();

        let result = sqlx::query(
            r#"
            INSERT INTO accounts (id, email, password_hash, full_name, gym_name,
                                  trial_end, subscription_status, plan, subscribed_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(&account.email)
        .bind(&hash)
        .bind(&account.full_name)
        .bind(&account.gym_name)
        .bind(account.trial_end.map(|t| *t.as_datetime()))
        .bind(status_to_string(&account.subscription_status))
        .bind(account.plan.as_ref().map(plan_to_string))
        .bind(account.subscribed_at.map(|t| *t.as_datetime()))
        .bind(account.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::validation(
                "email",
                "An account already exists for this email",
            ));
        }
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        let row: Option<(Uuid, String)> =
            sqlx::query_as("SELECT id, password_hash FROM accounts WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        let (account_id, stored_hash) = row.ok_or_else(invalid_credentials)?;

        let parsed = PasswordHash::new(&stored_hash)
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| invalid_credentials())?;

        let token = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO sessions (token, account_id) VALUES ($1, $2)")
            .bind(&token)
            .bind(account_id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(Session {
            token,
            account_id: AccountId::from_uuid(account_id),
        })
    }

    async fn session(&self, token: &str) -> Result<Option<Session>, DomainError> {
        let row: Option<(Uuid,)> =
            sqlx::query_as("SELECT account_id FROM sessions WHERE token = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(row.map(|(account_id,)| Session {
            token: token.to_string(),
            account_id: AccountId::from_uuid(account_id),
        }))
    }

    async fn sign_out(&self, token: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        let row: Option<AccountRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_ACCOUNT))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        row.map(Account::try_from).transpose()
    }

    async fn update_subscription(
        &self,
        id: &AccountId,
        plan: SubscriptionPlan,
        subscribed_at: Timestamp,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET subscription_status = 'active', plan = $2, subscribed_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(plan_to_string(&plan))
        .bind(subscribed_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::AccountNotFound, "Account not found"));
        }
        Ok(())
    }

    async fn reset_password(&self, email: &str) -> Result<(), DomainError> {
        // Delivery is the email provider's concern. Log and return
        // uniformly so the endpoint reveals nothing about registration.
        tracing::info!(email = %email, "password reset requested");
        Ok(())
    }
}
