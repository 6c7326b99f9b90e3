//! Account ownership checking for tenant-scoped resources.
//!
//! Every roster record belongs to exactly one gym-owner account. Aggregates
//! implement `OwnedByAccount` so command handlers can enforce the tenant
//! isolation invariant the same way everywhere: a record fetched by id must
//! be re-checked against the caller's account before any read of its data
//! or write against it.

use super::{AccountId, DomainError, ErrorCode};

/// Trait for aggregates scoped to a single owning account.
pub trait OwnedByAccount {
    /// Returns the id of the account that owns this record.
    fn owner_id(&self) -> &AccountId;

    /// Returns true if the given account is the owner.
    fn is_owned_by(&self, account_id: &AccountId) -> bool {
        self.owner_id() == account_id
    }

    /// Validates ownership, returning `Forbidden` if the account is not
    /// the owner.
    fn check_owner(&self, account_id: &AccountId) -> Result<(), DomainError> {
        if self.is_owned_by(account_id) {
            Ok(())
        } else {
            Err(
                DomainError::new(ErrorCode::Forbidden, "Record belongs to another account")
                    .with_detail("owner_id", self.owner_id().to_string())
                    .with_detail("requested_by", account_id.to_string()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRecord {
        owner: AccountId,
    }

    impl OwnedByAccount for TestRecord {
        fn owner_id(&self) -> &AccountId {
            &self.owner
        }
    }

    #[test]
    fn owner_passes_check() {
        let owner = AccountId::new();
        let record = TestRecord {
            owner,
        };

        assert!(record.is_owned_by(&owner));
        assert!(record.check_owner(&owner).is_ok());
    }

    #[test]
    fn other_account_is_forbidden() {
        let record = TestRecord {
            owner: AccountId::new(),
        };
        let intruder = AccountId::new();

        let err = record.check_owner(&intruder).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(
            err.details.get("requested_by"),
            Some(&intruder.to_string())
        );
    }
}
