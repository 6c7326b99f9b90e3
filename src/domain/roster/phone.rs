//! Phone number value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// A member's phone number: exactly 10 digits, no separators.
///
/// Validation is all-or-nothing; the input is never trimmed, padded, or
/// otherwise corrected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Validates and wraps a phone number.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidFormat` unless the input is exactly
    /// 10 ASCII digits.
    pub fn try_new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.len() != 10 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "phone",
                "Please enter a valid 10-digit phone number",
            ));
        }
        Ok(Self(raw))
    }

    /// Returns the digits as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Phone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Phone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Phone::try_new(raw).map_err(serde::de::Error::custom)
    }
}
