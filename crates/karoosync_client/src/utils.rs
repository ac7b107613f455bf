//! Date helpers shared by the clients and the locator.

use chrono::NaiveDate;

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Date part of an event's `start_date_local`.
///
/// Accepts:
/// - YYYY-MM-DD
/// - RFC3339 datetime (the local date as written, offset ignored)
/// - Naive datetime YYYY-MM-DDTHH:MM:SS
/// - Anything else that starts with YYYY-MM-DD
pub fn event_date(s: &str) -> Option<NaiveDate> {
    if let Some(d) = parse_date(s) {
        return Some(d);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local().date());
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(ndt.date());
    }
    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_date_accepts_date_only() {
        assert_eq!(event_date("2025-12-15"), NaiveDate::from_ymd_opt(2025, 12, 15));
    }

    #[test]
    fn event_date_accepts_naive_datetime() {
        assert_eq!(
            event_date("2025-12-15T10:30:00"),
            NaiveDate::from_ymd_opt(2025, 12, 15)
        );
    }

    #[test]
    fn event_date_keeps_local_date_of_rfc3339() {
        assert_eq!(
            event_date("2025-12-15T23:30:00+02:00"),
            NaiveDate::from_ymd_opt(2025, 12, 15)
        );
    }

    #[test]
    fn event_date_falls_back_to_leading_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(event_date("2024-03-01T07:00:00.000"), expected);
        assert_eq!(event_date("2024-03-01T07:00"), expected);
        assert_eq!(event_date("2024-03-01 07:00:00"), expected);
    }

    #[test]
    fn event_date_rejects_invalid() {
        assert!(event_date("2024-3-1T07:00").is_none());
        assert!(event_date("2024").is_none());
        assert!(event_date("not-a-date").is_none());
        assert!(parse_date("2025-13-01").is_none());
    }
}
