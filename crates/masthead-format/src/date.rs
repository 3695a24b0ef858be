//! Publish date formatting.
//!
//! Dates render as `"<Month> <Day>, <Year>"` in fixed US English. The
//! calendar date is taken as written; timestamps with an offset keep the
//! date in their own offset rather than being shifted to local time.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Rendered in place of input that is not a recognisable date.
pub const INVALID_DATE: &str = "Invalid Date";

const DISPLAY_FORMAT: &str = "%B %-d, %Y";

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a publish date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, and offset-less
/// `YYYY-MM-DDTHH:MM:SS` timestamps.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.date())
}

/// Format a publish date for display.
///
/// Empty input yields an empty string. Unrecognised input yields
/// [`INVALID_DATE`].
pub fn format_date(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    match parse_date(input) {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => {
            log::debug!("Unrecognised publish date: {input:?}");
            INVALID_DATE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_empty() {
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_format_date_calendar_date() {
        let formatted = format_date("2024-03-15");
        assert_eq!(formatted, "March 15, 2024");
        assert!(formatted.contains("2024"));
        assert!(formatted.contains("March"));
    }

    #[test]
    fn test_format_date_single_digit_day() {
        assert_eq!(format_date("2023-01-05"), "January 5, 2023");
    }

    #[test]
    fn test_format_date_rfc3339_keeps_own_offset() {
        assert_eq!(format_date("2024-03-15T23:30:00-08:00"), "March 15, 2024");
        assert_eq!(format_date("2024-12-31T00:15:00Z"), "December 31, 2024");
    }

    #[test]
    fn test_format_date_naive_datetime() {
        assert_eq!(format_date("2024-07-04T09:00:00"), "July 4, 2024");
        assert_eq!(format_date("2024-07-04T09:00:00.250"), "July 4, 2024");
        assert_eq!(format_date("2024-07-04 09:00:00"), "July 4, 2024");
    }

    #[test]
    fn test_format_date_invalid() {
        assert_eq!(format_date("next tuesday"), INVALID_DATE);
        assert_eq!(format_date("2024-02-30"), INVALID_DATE);
        assert_eq!(format_date("   "), INVALID_DATE);
    }

    #[test]
    fn test_parse_date_trims() {
        assert_eq!(
            parse_date(" 2024-03-15 "),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("").is_none());
        assert!(parse_date("15/03/2024").is_none());
    }
}
