//! Roster-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | MemberNotFound | 404 |
//! | Forbidden | 403 |
//! | ValidationFailed | 400 |
//! | Store | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, ValidationError};

/// Errors raised by roster operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// Member was not found under the caller's account.
    MemberNotFound(MemberId),

    /// Record belongs to another account.
    Forbidden,

    /// Validation failed; nothing was written.
    ValidationFailed { field: String, message: String },

    /// The roster store rejected an operation.
    Store(String),
}

impl RosterError {
    pub fn member_not_found(id: MemberId) -> Self {
        RosterError::MemberNotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RosterError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        RosterError::Store(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            RosterError::MemberNotFound(_) => ErrorCode::MemberNotFound,
            RosterError::Forbidden => ErrorCode::Forbidden,
            RosterError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            RosterError::Store(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            RosterError::MemberNotFound(id) => format!("Member not found: {}", id),
            RosterError::Forbidden => "Record belongs to another account".to_string(),
            RosterError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            RosterError::Store(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RosterError {}

impl From<ValidationError> for RosterError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotPositive { field } => field.clone(),
        };
        RosterError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for RosterError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => RosterError::Forbidden,
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                RosterError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            _ => RosterError::Store(err.to_string()),
        }
    }
}

impl From<RosterError> for DomainError {
    fn from(err: RosterError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
