//! DeleteMemberHandler - removes a member from the roster.
//!
//! Hard delete; there is no soft-delete state. Payments recorded against
//! the member remain (their joined display fields go blank).

use std::sync::Arc;

use crate::domain::foundation::{AccountId, MemberId, OwnedByAccount};
use crate::domain::roster::RosterError;
use crate::ports::MemberRepository;

/// Command to delete a member.
#[derive(Debug, Clone)]
pub struct DeleteMemberCommand {
    pub owner_id: AccountId,
    pub member_id: MemberId,
}

/// Handler for member deletion.
pub struct DeleteMemberHandler {
    members: Arc<dyn MemberRepository>,
}

impl DeleteMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    pub async fn handle(&self, cmd: DeleteMemberCommand) -> Result<(), RosterError> {
        let member = self
            .members
            .find(&cmd.owner_id, &cmd.member_id)
            .await?
            .ok_or(RosterError::MemberNotFound(cmd.member_id))?;
        member.check_owner(&cmd.owner_id)?;

        self.members.delete(&cmd.owner_id, &cmd.member_id).await?;

        tracing::debug!(member_id = %cmd.member_id, owner_id = %cmd.owner_id, "member deleted");

        Ok(())
    }
}
