//! PostgreSQL implementation of MemberRepository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{AccountId, DomainError, ErrorCode, MemberId};
use crate::domain::roster::{Member, MemberPlan, Phone};
use crate::ports::MemberRepository;

/// PostgreSQL implementation of the MemberRepository port.
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a member.
#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    phone: String,
    plan: String,
    join_date: NaiveDate,
    paid: bool,
}

impl TryFrom<MemberRow> for Member {
    type Error = DomainError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let plan = parse_plan(&row.plan)?;
        let phone = Phone::try_new(row.phone).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid phone: {}", e))
        })?;

        // The stored expiry_date column is only for SQL-side filtering;
        // rehydrate re-derives it so the invariant holds even if the
        // column drifted.
        Ok(Member::rehydrate(
            MemberId::from_uuid(row.id),
            AccountId::from_uuid(row.owner_id),
            row.name,
            phone,
            plan,
            row.join_date,
            row.paid,
        ))
    }
}

fn parse_plan(s: &str) -> Result<MemberPlan, DomainError> {
    match s.to_lowercase().as_str() {
        "monthly" => Ok(MemberPlan::Monthly),
        "quarterly" => Ok(MemberPlan::Quarterly),
        "annually" => Ok(MemberPlan::Annually),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid plan value: {}", s),
        )),
    }
}

fn plan_to_string(plan: &MemberPlan) -> &'static str {
    match plan {
        MemberPlan::Monthly => "monthly",
        MemberPlan::Quarterly => "quarterly",
        MemberPlan::Annually => "annually",
    }
}

fn db_error(err: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, err.to_string())
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn list(&self, owner_id: &AccountId) -> Result<Vec<Member>, DomainError> {
        let rows: Vec<MemberRow> = sqlx::query_as(
            r#"
            SELECT id, owner_id, name, phone, plan, join_date, paid
            FROM members
            WHERE owner_id = $1
            ORDER BY join_date DESC, name
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(Member::try_from).collect()
    }

    async fn find(
        &self,
        owner_id: &AccountId,
        id: &MemberId,
    ) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(
            r#"
            SELECT id, owner_id, name, phone, plan, join_date, paid
            FROM members
            WHERE owner_id = $1 AND id = $2
            "#,
        )
        .bind(owner_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Member::try_from).transpose()
    }

    async fn insert(&self, member: &Member) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO members (id, owner_id, name, phone, plan, join_date, expiry_date, paid)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(member.owner_id.as_uuid())
        .bind(&member.name)
        .bind(member.phone.as_str())
        .bind(plan_to_string(&member.plan))
        .bind(member.join_date)
        .bind(member.expiry_date())
        .bind(member.paid)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn update(&self, member: &Member) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE members
            SET name = $3, phone = $4, plan = $5, join_date = $6, expiry_date = $7, paid = $8
            WHERE owner_id = $1 AND id = $2
            "#,
        )
        .bind(member.owner_id.as_uuid())
        .bind(member.id.as_uuid())
        .bind(&member.name)
        .bind(member.phone.as_str())
        .bind(plan_to_string(&member.plan))
        .bind(member.join_date)
        .bind(member.expiry_date())
        .bind(member.paid)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found"));
        }
        Ok(())
    }

    async fn delete(&self, owner_id: &AccountId, id: &MemberId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM members WHERE owner_id = $1 AND id = $2")
            .bind(owner_id.as_uuid())
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_round_trips_through_strings() {
        for plan in [MemberPlan::Monthly, MemberPlan::Quarterly, MemberPlan::Annually] {
            assert_eq!(parse_plan(plan_to_string(&plan)).unwrap(), plan);
        }
    }

    #[test]
    fn unknown_plan_string_is_rejected() {
        assert!(parse_plan("weekly").is_err());
    }

    #[test]
    fn row_conversion_rederives_expiry() {
        let row = MemberRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "Arun".to_string(),
            phone: "9876543210".to_string(),
            plan: "quarterly".to_string(),
            join_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            paid: false,
        };

        let member = Member::try_from(row).unwrap();
        assert_eq!(
            member.expiry_date(),
            NaiveDate::from_ymd_opt(2024, 4, 15).unwrap()
        );
    }

    #[test]
    fn row_with_corrupt_phone_fails_conversion() {
        let row = MemberRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "Arun".to_string(),
            phone: "garbage".to_string(),
            plan: "monthly".to_string(),
            join_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            paid: false,
        };

        assert!(Member::try_from(row).is_err());
    }
}
