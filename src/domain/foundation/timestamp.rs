//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the UTC calendar date of this instant.
    pub fn date_utc(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }

    /// Returns the signed duration from another timestamp to this one.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn parse(s: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc),
        )
    }

    #[test]
    fn now_is_within_sampling_window() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn date_utc_truncates_time_of_day() {
        let ts = parse("2024-03-15T23:59:59Z");
        assert_eq!(
            ts.date_utc(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
    }

    #[test]
    fn add_days_crosses_month_boundary() {
        let ts = parse("2024-01-30T12:00:00Z");
        let later = ts.add_days(3);
        assert_eq!(later.as_datetime().month(), 2);
        assert_eq!(later.as_datetime().day(), 2);
    }

    #[test]
    fn minus_days_inverts_add_days() {
        let ts = parse("2024-06-10T08:00:00Z");
        assert_eq!(ts.add_days(14).minus_days(14), ts);
    }

    #[test]
    fn duration_since_is_signed() {
        let earlier = parse("2024-01-01T00:00:00Z");
        let later = parse("2024-01-08T00:00:00Z");

        assert_eq!(later.duration_since(&earlier).num_days(), 7);
        assert_eq!(earlier.duration_since(&later).num_days(), -7);
    }

    #[test]
    fn ordering_follows_chronology() {
        let ts1 = parse("2024-01-01T00:00:00Z");
        let ts2 = parse("2024-01-02T00:00:00Z");
        assert!(ts1 < ts2);
    }

    #[test]
    fn serializes_as_rfc3339_string() {
        let ts = parse("2024-01-15T10:30:00Z");
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("2024-01-15"));

        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }
}
