//! UpdateMemberHandler - edits a member through a validated field patch.
//!
//! Replaces the prompt-based inline editing of the old dashboard with the
//! same structured flow registration uses: validate first, then write.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{AccountId, MemberId, OwnedByAccount};
use crate::domain::roster::{Member, MemberPlan, MemberUpdate, Phone, RosterError};
use crate::ports::MemberRepository;

/// Command to edit an existing member. Absent fields stay as they are.
#[derive(Debug, Clone, Default)]
pub struct UpdateMemberCommand {
    pub owner_id: AccountId,
    pub member_id: MemberId,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub plan: Option<MemberPlan>,
    pub join_date: Option<NaiveDate>,
    pub paid: Option<bool>,
}

impl UpdateMemberCommand {
    /// A paid-toggle is just a patch with every other field absent.
    pub fn toggle_paid(owner_id: AccountId, member_id: MemberId, paid: bool) -> Self {
        Self {
            owner_id,
            member_id,
            paid: Some(paid),
            ..Default::default()
        }
    }
}

/// Handler for member edits.
pub struct UpdateMemberHandler {
    members: Arc<dyn MemberRepository>,
}

impl UpdateMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    /// Applies the patch. The expiry date is recomputed by the aggregate
    /// whenever the plan or join date changes.
    pub async fn handle(&self, cmd: UpdateMemberCommand) -> Result<Member, RosterError> {
        if let Some(name) = &cmd.name {
            if name.trim().is_empty() {
                return Err(RosterError::validation("name", "Please enter a name"));
            }
        }
        let phone = match cmd.phone {
            Some(raw) => Some(Phone::try_new(raw)?),
            None => None,
        };

        let mut member = self
            .members
            .find(&cmd.owner_id, &cmd.member_id)
            .await?
            .ok_or(RosterError::MemberNotFound(cmd.member_id))?;
        member.check_owner(&cmd.owner_id)?;

        member.apply(MemberUpdate {
            name: cmd.name.map(|n| n.trim().to_string()),
            phone,
            plan: cmd.plan,
            join_date: cmd.join_date,
            paid: cmd.paid,
        });

        self.members.update(&member).await?;

        Ok(member)
    }
}
