use crate::Calendar;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_COMMON_YEAR, DAYS_IN_LEAP_YEAR, GREGORIAN_CALENDAR_NAME, GREGORIAN_MONTHS,
    GREGORIAN_CYCLE, GREGORIAN_ERA_YEARS, LEAP_YEAR_CYCLE, LONG_CYCLE, LONG_CYCLE_EXCEPTION,
    UNIX_EPOCH_YEAR,
};
use std::borrow::Cow;

/// Month lengths of a common year, January first
pub const GREGORIAN_MONTH_DAYS: [u8; GREGORIAN_MONTHS] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Month lengths of a leap year
pub const GREGORIAN_LEAP_MONTH_DAYS: [u8; GREGORIAN_MONTHS] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Proleptic Gregorian days from year 0 to the Unix epoch (719 528)
pub const GREGORIAN_DAYS_TO_EPOCH: i64 = days_before_year(UNIX_EPOCH_YEAR);

/// Days in one 400-year Gregorian era (146 097)
pub const GREGORIAN_ERA_DAYS: i64 = days_before_year(GREGORIAN_ERA_YEARS);

/// Gregorian leap rule with the 3200/12800 long-cycle correction.
pub const fn is_leap_year(year: i64) -> bool {
    if year % LEAP_YEAR_CYCLE != 0 {
        return false;
    }
    if year % CENTURY_CYCLE == 0 && year % GREGORIAN_CYCLE != 0 {
        return false;
    }
    !(year % LONG_CYCLE == 0 && year % LONG_CYCLE_EXCEPTION != 0)
}

pub const fn days_in_year(year: i64) -> i64 {
    if is_leap_year(year) {
        DAYS_IN_LEAP_YEAR
    } else {
        DAYS_IN_COMMON_YEAR
    }
}

/// Days in years `0..year`, for non-negative `year`
const fn days_before_year(year: i64) -> i64 {
    let mut days = 0;
    let mut y = 0;
    while y < year {
        days += days_in_year(y);
        y += 1;
    }
    days
}

/// The proleptic Gregorian calendar, year 0 included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Gregorian;

impl Calendar for Gregorian {
    fn name(&self) -> &'static str {
        GREGORIAN_CALENDAR_NAME
    }

    fn era_length_years(&self) -> i64 {
        GREGORIAN_ERA_YEARS
    }

    fn era_length_days(&self) -> i64 {
        GREGORIAN_ERA_DAYS
    }

    fn days_to_epoch(&self) -> i64 {
        GREGORIAN_DAYS_TO_EPOCH
    }

    fn is_leap_year(&self, year: i64) -> bool {
        is_leap_year(year)
    }

    fn days_in_year(&self, year: i64) -> i64 {
        days_in_year(year)
    }

    fn month_lengths(&self, year: i64) -> Cow<'static, [u8]> {
        if is_leap_year(year) {
            Cow::Borrowed(&GREGORIAN_LEAP_MONTH_DAYS)
        } else {
            Cow::Borrowed(&GREGORIAN_MONTH_DAYS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: i64,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2020,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2023,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 1900,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2100,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 400",
            },
            TestCase {
                year: 0,
                is_leap: true,
                description: "year zero",
            },
            TestCase {
                year: -4,
                is_leap: true,
                description: "negative divisible by 4",
            },
            TestCase {
                year: -100,
                is_leap: false,
                description: "negative century",
            },
            TestCase {
                year: 3200,
                is_leap: false,
                description: "divisible by 3200",
            },
            TestCase {
                year: 6400,
                is_leap: false,
                description: "divisible by 3200",
            },
            TestCase {
                year: 12800,
                is_leap: true,
                description: "divisible by 12800",
            },
            TestCase {
                year: 3600,
                is_leap: true,
                description: "divisible by 400 but not 3200",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({}): expected {}",
                case.year,
                case.description,
                if case.is_leap {
                    "leap year"
                } else {
                    "not leap year"
                }
            );
        }
    }

    #[test]
    fn test_derived_constants() {
        assert_eq!(GREGORIAN_DAYS_TO_EPOCH, 719_528);
        assert_eq!(GREGORIAN_ERA_DAYS, 146_097);
    }

    #[test]
    fn test_era_days_match_default_sum() {
        let summed: i64 = (0..GREGORIAN_ERA_YEARS).map(days_in_year).sum();
        assert_eq!(Gregorian.era_length_days(), summed);
    }

    #[test]
    fn test_month_lengths_sum_to_year() {
        for year in [1900, 2000, 2023, 2024] {
            let total: i64 = Gregorian.month_lengths(year).iter().map(|&d| i64::from(d)).sum();
            assert_eq!(total, days_in_year(year), "Year {year}");
        }
    }

    #[test]
    fn test_february_length() {
        assert_eq!(Gregorian.month_lengths(2023)[1], 28);
        assert_eq!(Gregorian.month_lengths(2024)[1], 29);
        assert_eq!(Gregorian.month_lengths(1900)[1], 28);
    }

    #[test]
    fn test_year_of_era_lookup() {
        // 1970 is era-relative year 370 of the era starting in 1600
        let days_into_era = GREGORIAN_DAYS_TO_EPOCH - 4 * GREGORIAN_ERA_DAYS;
        assert_eq!(Gregorian.year_of_era(days_into_era), 370);
        assert_eq!(Gregorian.day_of_year(days_into_era, 370), 0);

        assert_eq!(Gregorian.year_of_era(365), 0);
        assert_eq!(Gregorian.year_of_era(366), 1);
        assert_eq!(Gregorian.year_of_era(GREGORIAN_ERA_DAYS - 1), 399);
    }
}
