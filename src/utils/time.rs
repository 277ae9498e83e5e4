//! Time utilities: UTC instants in their canonical DB form, plus the
//! per-request clock sample.
//!
//! Lecture instants are stored as fixed-width `%Y-%m-%dT%H:%M:%SZ` text so
//! lexicographic comparison in SQL matches chronological order.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDateTime, Utc};

const DB_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format a UTC instant in the canonical DB representation.
pub fn fmt_utc(dt: DateTime<Utc>) -> String {
    dt.format(DB_FORMAT).to_string()
}

/// Parse a UTC instant from the canonical DB representation.
pub fn parse_utc(s: &str) -> AppResult<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s, DB_FORMAT)
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))?;
    Ok(naive.and_utc())
}

/// Sample "now" once for the whole request.
///
/// An explicit override (the hidden `--at` flag) pins the clock; also accepts
/// plain RFC 3339 for convenience.
pub fn request_now(at: Option<&str>) -> AppResult<DateTime<Utc>> {
    match at {
        None => Ok(Utc::now()),
        Some(s) => parse_utc(s).or_else(|_| {
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fmt_parse_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap();
        let s = fmt_utc(dt);
        assert_eq!(s, "2025-03-10T10:00:00Z");
        assert_eq!(parse_utc(&s).unwrap(), dt);
    }

    #[test]
    fn canonical_form_sorts_chronologically() {
        let a = fmt_utc(Utc.with_ymd_and_hms(2025, 3, 9, 23, 59, 59).unwrap());
        let b = fmt_utc(Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap());
        assert!(a < b);
    }

    #[test]
    fn request_now_accepts_rfc3339_offset() {
        let dt = request_now(Some("2025-03-10T12:00:00+02:00")).unwrap();
        assert_eq!(fmt_utc(dt), "2025-03-10T10:00:00Z");
    }

    #[test]
    fn request_now_rejects_garbage() {
        assert!(request_now(Some("not-a-time")).is_err());
    }
}
