//! The AMC Martian sol calendar (`amc_msd`).
//!
//! A year has 668 or 669 sols split into 24 months of 28 sols, with the last
//! month shortened to 24 or 25 sols. Leap years follow an irrational-ratio rule
//! instead of a lookup table. The constants are kept exactly as published by
//! the calendar; they are not astronomically refined.

use crate::Calendar;
use crate::consts::{
    AMC_COMMON_YEAR_SOLS, AMC_DAYS_TO_EPOCH, AMC_ERA_YEARS, AMC_LEAP_RATIO, AMC_LEAP_YEAR_SOLS,
    AMC_MONTHS, AMC_MONTH_SOLS, AMC_MSD_CALENDAR_NAME, MARS_SOL_MILLIS,
};
use std::borrow::Cow;

const S: u8 = AMC_MONTH_SOLS;

/// Month lengths of a common AMC year (668 sols)
#[rustfmt::skip]
pub const AMC_MONTH_SOLS_TABLE: [u8; AMC_MONTHS] = [
    S, S, S, S, S, S, S, S, S, S, S, S,
    S, S, S, S, S, S, S, S, S, S, S, S - 4,
];

/// Month lengths of a leap AMC year (669 sols)
#[rustfmt::skip]
pub const AMC_LEAP_MONTH_SOLS_TABLE: [u8; AMC_MONTHS] = [
    S, S, S, S, S, S, S, S, S, S, S, S,
    S, S, S, S, S, S, S, S, S, S, S, S - 3,
];

/// A year is leap when `floor(0.5907 * (year + 1))` steps past `floor(0.5907 * year)`.
pub fn is_leap_year(year: i64) -> bool {
    let current = (year + 1) as f64 * AMC_LEAP_RATIO;
    let previous = year as f64 * AMC_LEAP_RATIO;
    current.floor() > previous.floor()
}

pub fn days_in_year(year: i64) -> i64 {
    if is_leap_year(year) {
        AMC_LEAP_YEAR_SOLS
    } else {
        AMC_COMMON_YEAR_SOLS
    }
}

/// Mars sol date calendar with a 100-year era and a 88 775 244.147 ms sol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AmcMsd;

impl Calendar for AmcMsd {
    fn name(&self) -> &'static str {
        AMC_MSD_CALENDAR_NAME
    }

    fn era_length_years(&self) -> i64 {
        AMC_ERA_YEARS
    }

    fn days_to_epoch(&self) -> i64 {
        AMC_DAYS_TO_EPOCH
    }

    fn is_leap_year(&self, year: i64) -> bool {
        is_leap_year(year)
    }

    fn days_in_year(&self, year: i64) -> i64 {
        days_in_year(year)
    }

    fn month_lengths(&self, year: i64) -> Cow<'static, [u8]> {
        if is_leap_year(year) {
            Cow::Borrowed(&AMC_LEAP_MONTH_SOLS_TABLE)
        } else {
            Cow::Borrowed(&AMC_MONTH_SOLS_TABLE)
        }
    }

    fn millis_per_day(&self) -> Option<f64> {
        Some(MARS_SOL_MILLIS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_leap_year_cases() {
        // leap years run 1, 3, 5, 6, 8, ...
        let expected = [
            (0, false),
            (1, true),
            (2, false),
            (3, true),
            (4, false),
            (5, true),
            (6, true),
            (104, true),
            (100, false),
        ];
        for (year, is_leap) in expected {
            assert_eq!(is_leap_year(year), is_leap, "AMC year {year}");
        }
    }

    #[test]
    fn test_era_length() {
        // 59 leap years in the first century: floor(0.5907 * 100)
        let leap_count = (0..AMC_ERA_YEARS).filter(|&y| is_leap_year(y)).count();
        assert_eq!(leap_count, 59);
        assert_eq!(AmcMsd.era_length_days(), 100 * 668 + 59);
    }

    #[test]
    fn test_month_tables() {
        let common: i64 = AMC_MONTH_SOLS_TABLE.iter().map(|&d| i64::from(d)).sum();
        let leap: i64 = AMC_LEAP_MONTH_SOLS_TABLE.iter().map(|&d| i64::from(d)).sum();
        assert_eq!(common, 668);
        assert_eq!(leap, 669);
        assert_eq!(AmcMsd.month_lengths(0).len(), 24);
        assert_eq!(AmcMsd.month_lengths(1)[23], 25);
        assert_eq!(AmcMsd.month_lengths(2)[23], 24);
    }

    #[test]
    fn test_sol_length() {
        assert_eq!(AmcMsd.millis_per_day(), Some(88_775_244.147));
        assert_eq!(AmcMsd.days_to_epoch(), 69_972);
        assert_eq!(AmcMsd.name(), "amc_msd");
    }
}
