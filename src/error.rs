//! Error types for calendar construction.

use chrono::NaiveDate;

/// Error type for all fallible operations in the crate.
///
/// Every variant describes a rejected argument: the engine never clamps an
/// out-of-range input into a nearby valid one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a (year, month) pair does not name a representable month.
    #[error("invalid year-month {year}-{month:02}")]
    InvalidYearMonth {
        /// The requested year.
        year: i32,
        /// The requested month number.
        month: u32,
    },

    /// Returned when a month index decodes outside the supported calendar range.
    #[error("month index {index} is out of range")]
    InvalidMonthIndex {
        /// The rejected index.
        index: i32,
    },

    /// Returned when the grid for a month would reach past the representable range.
    #[error("grid for {date} leaves the supported date range")]
    DateOutOfRange {
        /// First day of the month whose grid could not be built.
        date: NaiveDate,
    },

    /// Returned when an event description cannot be parsed.
    #[error("invalid event `{input}`: {reason}")]
    InvalidEvent {
        /// The text that was rejected.
        input: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Returned for malformed command-line arguments.
    #[error("{0}")]
    InvalidArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_year_month() {
        let e = CalendarError::InvalidYearMonth {
            year: 2024,
            month: 13,
        };
        assert_eq!(e.to_string(), "invalid year-month 2024-13");
    }

    #[test]
    fn error_invalid_month_index() {
        let e = CalendarError::InvalidMonthIndex { index: i32::MAX };
        assert_eq!(e.to_string(), "month index 2147483647 is out of range");
    }

    #[test]
    fn error_date_out_of_range() {
        let e = CalendarError::DateOutOfRange {
            date: NaiveDate::MIN,
        };
        assert!(e.to_string().ends_with("leaves the supported date range"));
    }

    #[test]
    fn error_invalid_event() {
        let e = CalendarError::InvalidEvent {
            input: "xx".to_string(),
            reason: "bad date",
        };
        assert_eq!(e.to_string(), "invalid event `xx`: bad date");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<CalendarError>();
    }
}
