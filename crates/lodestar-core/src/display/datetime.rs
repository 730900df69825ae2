//! DateTime display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Formats a timestamp in the system timezone as `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Formats only the calendar date of a timestamp, in UTC.
///
/// Deadlines are day-granular, and a date-only deadline is stored as
/// midnight UTC, so rendering it in UTC shows the day the user entered.
pub struct LocalDate<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_zoned(TimeZone::UTC).strftime("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_date_is_utc_day() {
        let ts: Timestamp = "2026-02-01T00:00:00Z".parse().unwrap();
        assert_eq!(LocalDate(&ts).to_string(), "2026-02-01");
    }

    #[test]
    fn test_local_datetime_shape() {
        let ts = Timestamp::from_second(1640995200).unwrap();
        let output = LocalDateTime(&ts).to_string();
        // Date, time and zone abbreviation
        assert_eq!(output.split(' ').count(), 3);
        assert!(output.starts_with("202"));
    }
}
