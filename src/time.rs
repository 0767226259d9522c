//! Time related utils.

use crate::{Error, Result};

/// DateTime in UTC, second precision is all signing ever needs.
pub type DateTime = chrono::DateTime<chrono::Utc>;

/// Create a datetime of the current time.
pub fn now() -> DateTime {
    chrono::Utc::now()
}

/// Format a datetime into the credential scope date: `20150830`.
pub fn format_date(t: DateTime) -> String {
    t.format("%Y%m%d").to_string()
}

/// Format a datetime into ISO-8601 basic: `20150830T123600Z`.
///
/// This value is used for both the `x-amz-date` header and the string to
/// sign, so it must be computed once per signing operation.
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Parse an RFC 3339 timestamp, e.g. a credential expiry.
pub fn parse_rfc3339(s: &str) -> Result<DateTime> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&chrono::Utc))
        .map_err(|e| Error::unexpected(format!("parsing {s} as rfc3339 failed")).with_source(e))
}
