//! Multi-calendar conversion between millisecond timestamps and date parts.
//!
//! A [`CalendarEngine`] wraps a declarative [`Calendar`] description (month
//! tables, leap rule, era length, epoch offset) and converts in both
//! directions, normalizes out-of-range fields, and does calendar-aware
//! arithmetic. Three calendars ship with the crate:
//!
//! - [`Gregorian`], proleptic, with the 3200/12800 long-cycle leap correction
//! - [`Ordo13`], thirteen months on Gregorian year boundaries
//! - [`AmcMsd`], the AMC Martian sol calendar
//!
//! ```
//! use date13::{CalendarEngine, DateParts};
//!
//! let engine = CalendarEngine::gregorian();
//! let parts = engine.to_date_parts(1_696_161_600_000.0).unwrap();
//! assert_eq!((parts.year, parts.month, parts.date, parts.hour), (2023.0, 9.0, 1.0, 12.0));
//!
//! // Feb 29 of a common year rolls into March
//! let march = DateParts::new("gregorian", 2021.0, 1.0, 29.0);
//! let timestamp = engine.from_date_parts(&march).unwrap();
//! assert_eq!(engine.to_date_parts(timestamp).unwrap().month, 2.0);
//! ```
//!
//! Values are `f64` throughout: a NaN or infinite input yields NaN output
//! rather than an error. [`CalendarError`] is reserved for calendar
//! descriptions that contradict themselves.

mod calendar;
mod consts;
mod engine;
pub mod gregorian;
pub mod mars;
mod normalize;
pub mod ordo13;
mod prelude;
mod types;

pub use calendar::{Calendar, CalendarKind};
pub use consts::*;
pub use engine::{CalendarEngine, TimestampCodec};
pub use gregorian::Gregorian;
pub use mars::AmcMsd;
pub use ordo13::Ordo13;
pub use types::{
    ClockShape, DateParts, Delta, EpochScale, PartialDateParts, RollDirection, TimezoneOffset,
};

/// Errors raised by an inconsistent calendar description or an unknown calendar name.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// No calendar is registered under the name.
    #[error("Unknown calendar: {0}")]
    UnknownCalendar(String),

    /// A day-of-year lookup fell outside the month table of its year.
    #[error("Day {day_of_year} of year {year} is outside the {calendar} month table")]
    DayOfYearOutOfRange {
        calendar: &'static str,
        year: i64,
        day_of_year: i64,
    },

    /// Day normalization kept rolling months past the iteration cap.
    #[error("Day normalization did not settle rolling {direction} after {limit} months")]
    NormalizationDiverged {
        direction: RollDirection,
        limit: usize,
    },

    /// The day length is zero, negative or not finite.
    #[error("Invalid day length: {millis_per_day} ms")]
    InvalidDayLength { millis_per_day: f64 },

    /// The era spans no years.
    #[error("Invalid era length: {years} years")]
    InvalidEraLength { years: i64 },

    /// A year has a different number of months than year 0.
    #[error("Year {year} has {actual} months, expected {expected}")]
    MonthCountMismatch {
        year: i64,
        expected: usize,
        actual: usize,
    },

    /// A month has zero days.
    #[error("Month {month} of year {year} has no days")]
    EmptyMonth { year: i64, month: usize },

    /// A month table does not sum to its year length.
    #[error("Year {year} months sum to {actual} days, expected {expected}")]
    YearLengthMismatch { year: i64, expected: i64, actual: i64 },

    /// The years of an era do not sum to the era length.
    #[error("{years}-year era has {actual} days, expected {expected}")]
    EraLengthMismatch {
        years: i64,
        expected: i64,
        actual: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        struct TestCase {
            error: CalendarError,
            expected: &'static str,
        }

        let cases = [
            TestCase {
                error: CalendarError::UnknownCalendar("julian".into()),
                expected: "Unknown calendar: julian",
            },
            TestCase {
                error: CalendarError::NormalizationDiverged {
                    direction: RollDirection::Backward,
                    limit: MAX_NORMALIZE_ITERATIONS,
                },
                expected: "Day normalization did not settle rolling backward after 100 months",
            },
            TestCase {
                error: CalendarError::DayOfYearOutOfRange {
                    calendar: "lopsided",
                    year: 2,
                    day_of_year: 11,
                },
                expected: "Day 11 of year 2 is outside the lopsided month table",
            },
            TestCase {
                error: CalendarError::EmptyMonth { year: 0, month: 3 },
                expected: "Month 3 of year 0 has no days",
            },
            TestCase {
                error: CalendarError::EraLengthMismatch {
                    years: 400,
                    expected: 146_097,
                    actual: 146_096,
                },
                expected: "400-year era has 146096 days, expected 146097",
            },
        ];

        for case in &cases {
            assert_eq!(case.error.to_string(), case.expected);
        }
    }

    #[test]
    fn test_engine_by_name() {
        assert_eq!(
            CalendarEngine::by_name("ordo13").unwrap().calendar_name(),
            "ordo13"
        );
        assert_eq!(
            CalendarEngine::by_name(" AMC_MSD ").unwrap().calendar_name(),
            "amc_msd"
        );
        assert_eq!(
            CalendarEngine::by_name("julian").unwrap_err(),
            CalendarError::UnknownCalendar("julian".into())
        );
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CalendarEngine>();
        assert_send_sync::<CalendarEngine<Gregorian>>();
        assert_send_sync::<CalendarError>();
    }
}
