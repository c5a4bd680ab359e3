use crate::Calendar;
use crate::consts::{GREGORIAN_ERA_YEARS, ORDO13_CALENDAR_NAME, ORDO13_MONTHS, ORDO13_MONTH_DAYS};
use crate::gregorian::{self, GREGORIAN_DAYS_TO_EPOCH, GREGORIAN_ERA_DAYS};
use std::borrow::Cow;

const M: u8 = ORDO13_MONTH_DAYS;

/// Month lengths of a common Ordo13 year: twelve 28-day months and a 29-day thirteenth
pub const ORDO13_MONTH_DAYS_TABLE: [u8; ORDO13_MONTHS] = [M, M, M, M, M, M, M, M, M, M, M, M, M + 1];

/// Month lengths of a leap Ordo13 year: the thirteenth month absorbs the leap day
pub const ORDO13_LEAP_MONTH_DAYS_TABLE: [u8; ORDO13_MONTHS] = [M, M, M, M, M, M, M, M, M, M, M, M, M + 2];

/// A 13-month calendar sharing the Gregorian year boundaries and leap rule.
///
/// Year `n` starts on Gregorian January 1 of year `n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Ordo13;

impl Calendar for Ordo13 {
    fn name(&self) -> &'static str {
        ORDO13_CALENDAR_NAME
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
        gregorian::is_leap_year(year)
    }

    fn days_in_year(&self, year: i64) -> i64 {
        gregorian::days_in_year(year)
    }

    fn month_lengths(&self, year: i64) -> Cow<'static, [u8]> {
        if gregorian::is_leap_year(year) {
            Cow::Borrowed(&ORDO13_LEAP_MONTH_DAYS_TABLE)
        } else {
            Cow::Borrowed(&ORDO13_MONTH_DAYS_TABLE)
        }
    }
}
