//! Member repository port.
//!
//! Every operation is scoped to an owning account; implementations must
//! never return or touch rows belonging to another account (tenant
//! isolation is enforced both here and in the domain ownership check).

use async_trait::async_trait;

use crate::domain::foundation::{AccountId, DomainError, MemberId};
use crate::domain::roster::Member;

/// Repository port for roster members.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Lists all members of an account.
    async fn list(&self, owner_id: &AccountId) -> Result<Vec<Member>, DomainError>;

    /// Finds a member by id within an account. Returns `None` when the id
    /// does not exist under that account.
    async fn find(
        &self,
        owner_id: &AccountId,
        id: &MemberId,
    ) -> Result<Option<Member>, DomainError>;

    /// Inserts a newly registered member.
    async fn insert(&self, member: &Member) -> Result<(), DomainError>;

    /// Persists an edited member.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member does not exist under its owner
    async fn update(&self, member: &Member) -> Result<(), DomainError>;

    /// Deletes a member. No soft delete.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member does not exist under that account
    async fn delete(&self, owner_id: &AccountId, id: &MemberId) -> Result<(), DomainError>;
}
