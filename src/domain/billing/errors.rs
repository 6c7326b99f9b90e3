//! Billing-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | AccountNotFound | 404 |
//! | EmailTaken | 409 |
//! | MetadataMissing | 403 |
//! | InvalidCredentials | 401 |
//! | InvalidSignature | 401 |
//! | ValidationFailed | 400 |
//! | Store | 500 |

use crate::domain::foundation::{AccountId, DomainError, ErrorCode};

/// Errors raised by account and subscription operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    /// Account was not found.
    AccountNotFound(AccountId),

    /// An account already exists for this email.
    EmailTaken(String),

    /// Required account metadata (trial_end) is absent. This is a terminal
    /// per-screen state: callers must refuse to render financial data and
    /// force sign-out-and-retry, never fall back to granting or denying
    /// access as if the trial had merely expired.
    MetadataMissing(AccountId),

    /// Email/password combination did not match.
    InvalidCredentials,

    /// Checkout confirmation signature did not verify.
    InvalidSignature,

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// The account store rejected an operation.
    Store(String),
}

impl BillingError {
    pub fn account_not_found(id: AccountId) -> Self {
        BillingError::AccountNotFound(id)
    }

    pub fn email_taken(email: impl Into<String>) -> Self {
        BillingError::EmailTaken(email.into())
    }

    pub fn metadata_missing(id: AccountId) -> Self {
        BillingError::MetadataMissing(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BillingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        BillingError::Store(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            BillingError::AccountNotFound(_) => ErrorCode::AccountNotFound,
            BillingError::EmailTaken(_) => ErrorCode::ValidationFailed,
            BillingError::MetadataMissing(_) => ErrorCode::MetadataMissing,
            BillingError::InvalidCredentials => ErrorCode::InvalidCredentials,
            BillingError::InvalidSignature => ErrorCode::InvalidSignature,
            BillingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            BillingError::Store(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            BillingError::AccountNotFound(id) => format!("Account not found: {}", id),
            BillingError::EmailTaken(email) => {
                format!("An account already exists for {}", email)
            }
            BillingError::MetadataMissing(_) => {
                "Account profile is incomplete. Please log out and log in again.".to_string()
            }
            BillingError::InvalidCredentials => "Invalid email or password".to_string(),
            BillingError::InvalidSignature => {
                "Payment confirmation could not be verified".to_string()
            }
            BillingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            BillingError::Store(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for BillingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BillingError {}

impl From<DomainError> for BillingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                BillingError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            ErrorCode::InvalidCredentials => BillingError::InvalidCredentials,
            _ => BillingError::Store(err.to_string()),
        }
    }
}

impl From<BillingError> for DomainError {
    fn from(err: BillingError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_missing_has_distinct_code() {
        let err = BillingError::metadata_missing(AccountId::new());
        assert_eq!(err.code(), ErrorCode::MetadataMissing);
        assert!(err.message().contains("log out"));
    }

    #[test]
    fn invalid_signature_maps_to_signature_code() {
        assert_eq!(
            BillingError::InvalidSignature.code(),
            ErrorCode::InvalidSignature
        );
    }

    #[test]
    fn email_taken_message_includes_email() {
        let err = BillingError::email_taken("owner@gym.example");
        assert!(err.message().contains("owner@gym.example"));
    }

    #[test]
    fn converts_to_domain_error() {
        let err = BillingError::account_not_found(AccountId::new());
        let domain: DomainError = err.clone().into();
        assert_eq!(domain.code, err.code());
    }

    #[test]
    fn validation_domain_error_round_trips_field() {
        let domain = DomainError::validation("email", "invalid format");
        let billing: BillingError = domain.into();
        assert!(matches!(
            billing,
            BillingError::ValidationFailed { ref field, .. } if field == "email"
        ));
    }
}
