//! Time related utils.

use chrono::SecondsFormat;
use chrono::Utc;

/// DateTime in UTC.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a [`DateTime`] of current time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format a date time into the signing timestamp.
///
/// The API signs an ISO-8601 date time with an explicit numeric UTC
/// offset: `2022-03-13T07:20:04+00:00`. The output never depends on the
/// host locale or timezone since the input is already UTC.
pub fn format_signing_date(t: DateTime) -> String {
    t.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Format a date time into the ISO-8601 form used in query parameters.
///
/// `2022-03-13T07:20:04Z`, seconds precision.
pub fn format_query_date(t: DateTime) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}
