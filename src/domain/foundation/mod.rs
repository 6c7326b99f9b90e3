//! Foundation types shared by every domain module.
//!
//! Typed identifiers, timestamps, the error taxonomy, and the account
//! ownership contract live here so the billing and roster modules agree on
//! the same primitives.

mod errors;
mod ids;
mod ownership;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AccountId, MemberId, PaymentId};
pub use ownership::OwnedByAccount;
pub use timestamp::Timestamp;
