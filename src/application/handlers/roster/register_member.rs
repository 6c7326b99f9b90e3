//! RegisterMemberHandler - adds a member to the caller's roster.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{AccountId, MemberId, Timestamp};
use crate::domain::roster::{Member, MemberPlan, Phone, RosterError};
use crate::ports::MemberRepository;

/// Command to register a new member.
#[derive(Debug, Clone)]
pub struct RegisterMemberCommand {
    pub owner_id: AccountId,
    pub name: String,
    pub phone: String,
    pub plan: MemberPlan,
    /// Defaults to today (UTC) when not supplied.
    pub join_date: Option<NaiveDate>,
}

/// Handler for member registration.
pub struct RegisterMemberHandler {
    members: Arc<dyn MemberRepository>,
}

impl RegisterMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    /// Validates, derives the expiry date, and inserts scoped to the owner.
    /// Validation failures leave the store untouched.
    pub async fn handle(&self, cmd: RegisterMemberCommand) -> Result<Member, RosterError> {
        let name = cmd.name.trim();
        if name.is_empty() {
            return Err(RosterError::validation("name", "Please enter a name"));
        }
        let phone = Phone::try_new(cmd.phone)?;

        let join_date = cmd
            .join_date
            .unwrap_or_else(|| Timestamp::now().date_utc());

        let member = Member::register(
            MemberId::new(),
            cmd.owner_id,
            name,
            phone,
            cmd.plan,
            join_date,
        );

        self.members.insert(&member).await?;

        tracing::debug!(member_id = %member.id, owner_id = %cmd.owner_id, "member registered");

        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMemberRepository;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (RegisterMemberHandler, Arc<InMemoryMemberRepository>) {
        let repo = Arc::new(InMemoryMemberRepository::new());
        (RegisterMemberHandler::new(repo.clone()), repo)
    }

    fn valid_command(owner: AccountId) -> RegisterMemberCommand {
        RegisterMemberCommand {
            owner_id: owner,
            name: "Arun Mehta".to_string(),
            phone: "9876543210".to_string(),
            plan: MemberPlan::Quarterly,
            join_date: Some(date(2024, 1, 15)),
        }
    }

    #[tokio::test]
    async fn registers_with_derived_expiry() {
        let owner = AccountId::new();
        let (handler, repo) = setup();

        let member = handler.handle(valid_command(owner)).await.unwrap();
        assert_eq!(member.expiry_date(), date(2024, 4, 15));

        // Round-trip: the stored record carries the same derived expiry.
        let stored = repo.find(&owner, &member.id).await.unwrap().unwrap();
        assert_eq!(
            stored.expiry_date(),
            member.plan.derive_expiry(member.join_date)
        );
    }

    #[tokio::test]
    async fn join_date_defaults_to_today() {
        let owner = AccountId::new();
        let (handler, _) = setup();

        let mut cmd = valid_command(owner);
        cmd.join_date = None;

        let member = handler.handle(cmd).await.unwrap();
        assert_eq!(member.join_date, Timestamp::now().date_utc());
    }

    #[tokio::test]
    async fn bad_phone_writes_nothing() {
        let owner = AccountId::new();
        let (handler, repo) = setup();

        let mut cmd = valid_command(owner);
        cmd.phone = "12345".to_string();

        let result = handler.handle(cmd).await;
        assert!(matches!(
            result,
            Err(RosterError::ValidationFailed { ref field, .. }) if field == "phone"
        ));
        assert!(repo.list(&owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn phone_with_letters_rejected() {
        let owner = AccountId::new();
        let (handler, _) = setup();

        let mut cmd = valid_command(owner);
        cmd.phone = "12345abcde".to_string();

        assert!(handler.handle(cmd).await.is_err());
    }

    #[tokio::test]
    async fn blank_name_rejected() {
        let owner = AccountId::new();
        let (handler, repo) = setup();

        let mut cmd = valid_command(owner);
        cmd.name = "  ".to_string();

        assert!(handler.handle(cmd).await.is_err());
        assert!(repo.list(&owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn member_is_scoped_to_its_owner() {
        let owner = AccountId::new();
        let (handler, repo) = setup();

        handler.handle(valid_command(owner)).await.unwrap();

        assert_eq!(repo.list(&owner).await.unwrap().len(), 1);
        assert!(repo.list(&AccountId::new()).await.unwrap().is_empty());
    }
}
