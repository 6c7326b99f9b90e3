//! Monetary amount value object.
//!
//! All money is carried as i64 minor currency units (paise). Summing stays
//! exact; there is no floating point anywhere on the money path.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// A strictly positive payment amount in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Wraps a minor-unit amount, rejecting zero and negatives.
    pub fn try_new(minor_units: i64) -> Result<Self, ValidationError> {
        if minor_units <= 0 {
            return Err(ValidationError::not_positive("amount"));
        }
        Ok(Self(minor_units))
    }

    /// Parses a decimal string such as `"499"` or `"0.01"` into minor units.
    ///
    /// At most two fractional digits are accepted; the value must be
    /// strictly positive.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        let invalid = || ValidationError::invalid_format("amount", "Please enter a valid amount");

        let (whole, frac) = match raw.split_once('.') {
            Some((w, f)) => (w, f),
            None => (raw, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.is_empty() && !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole_units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let frac_units: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        let minor = whole_units
            .checked_mul(100)
            .and_then(|w| w.checked_add(frac_units))
            .ok_or_else(invalid)?;

        Self::try_new(minor)
    }

    /// Returns the amount in minor units.
    pub fn minor_units(&self) -> i64 {
        self.0
    }

    /// Renders the amount as a plain decimal string ("499" or "499.50").
    ///
    /// Whole amounts drop the fractional part, matching how they were
    /// entered; this is also the form payment search matches against.
    pub fn to_decimal_string(&self) -> String {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            whole.to_string()
        } else {
            format!("{}.{:02}", whole, frac)
        }
    }
}

/// Sums amounts exactly into a minor-unit total.
///
/// A total can legitimately be zero (no payments yet), so the result is a
/// raw i64 rather than an `Amount`.
pub fn total_minor_units<'a>(amounts: impl IntoIterator<Item = &'a Amount>) -> i64 {
    amounts.into_iter().map(|a| a.0).sum()
}
