//! PostgreSQL implementation of PaymentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    AccountId, DomainError, ErrorCode, MemberId, PaymentId, Timestamp,
};
use crate::domain::roster::{Amount, Payment, PaymentMethod, PaymentWithMember, Phone};
use crate::ports::PaymentRepository;

/// PostgreSQL implementation of the PaymentRepository port.
pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Payment row joined with its member's display fields.
#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    member_id: Uuid,
    owner_id: Uuid,
    amount_minor_units: i64,
    method: String,
    recorded_at: DateTime<Utc>,
    member_name: Option<String>,
    member_phone: Option<String>,
}

impl TryFrom<PaymentRow> for PaymentWithMember {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let method = parse_method(&row.method)?;
        let amount = Amount::try_new(row.amount_minor_units).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid amount: {}", e))
        })?;
        let member_phone = row
            .member_phone
            .map(Phone::try_new)
            .transpose()
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid phone: {}", e))
            })?;

        Ok(PaymentWithMember {
            payment: Payment::record(
                PaymentId::from_uuid(row.id),
                MemberId::from_uuid(row.member_id),
                AccountId::from_uuid(row.owner_id),
                amount,
                method,
                Timestamp::from_datetime(row.recorded_at),
            ),
            member_name: row.member_name,
            member_phone,
        })
    }
}

fn parse_method(s: &str) -> Result<PaymentMethod, DomainError> {
    match s.to_lowercase().as_str() {
        "cash" => Ok(PaymentMethod::Cash),
        "online" => Ok(PaymentMethod::Online),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid method value: {}", s),
        )),
    }
}

fn method_to_string(method: &PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "cash",
        PaymentMethod::Online => "online",
    }
}

fn db_error(err: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, err.to_string())
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn insert(&self, payment: &Payment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payments (id, member_id, owner_id, amount_minor_units, method, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.member_id.as_uuid())
        .bind(payment.owner_id.as_uuid())
        .bind(payment.amount.minor_units())
        .bind(method_to_string(&payment.method))
        .bind(payment.recorded_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn list_with_member(
        &self,
        owner_id: &AccountId,
    ) -> Result<Vec<PaymentWithMember>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.member_id, p.owner_id, p.amount_minor_units, p.method,
                   p.recorded_at, m.name AS member_name, m.phone AS member_phone
            FROM payments p
            LEFT JOIN members m ON m.id = p.member_id AND m.owner_id = p.owner_id
            WHERE p.owner_id = $1
            ORDER BY p.recorded_at DESC
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(PaymentWithMember::try_from).collect()
    }
}
