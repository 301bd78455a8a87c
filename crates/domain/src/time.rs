//! Time and timestamp helpers.

use chrono::{DateTime, NaiveDateTime, Utc};

/// UTC timestamp used for `created_at` and `updated_at`.
pub type Timestamp = DateTime<Utc>;

/// Format of timestamps in the JSON representation of a record.
pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Render a timestamp with [`FORMAT`].
#[must_use]
pub fn format(ts: &Timestamp) -> String {
    ts.format(FORMAT).to_string()
}

/// Parse a timestamp rendered with [`FORMAT`], interpreted as UTC.
///
/// # Errors
///
/// Returns [`chrono::ParseError`] when `s` does not match [`FORMAT`].
pub fn parse(s: &str) -> Result<Timestamp, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, FORMAT).map(|naive| naive.and_utc())
}

/// `serde(with = ...)` adapter using [`FORMAT`].
pub mod serde_format {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Timestamp;

    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_format_with_microseconds_and_no_offset() {
        let ts = Utc.with_ymd_and_hms(2017, 3, 25, 2, 17, 6).unwrap();
        assert_eq!(format(&ts), "2017-03-25T02:17:06.000000");
    }

    #[test]
    fn should_parse_what_it_formats() {
        let ts = now();
        let parsed = parse(&format(&ts)).unwrap();
        assert_eq!(parsed.timestamp_micros(), ts.timestamp_micros());
    }

    #[test]
    fn should_reject_rfc3339_offset() {
        assert!(parse("2017-03-25T02:17:06+00:00").is_err());
    }
}
