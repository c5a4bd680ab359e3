//! The calendar capability interface and the set of named calendars.

use crate::prelude::*;
use crate::{AmcMsd, CalendarError, ClockShape, EpochScale, Gregorian, Ordo13};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;

/// Declarative description of a calendar, consumed by [`CalendarEngine`](crate::CalendarEngine).
///
/// A calendar repeats in eras of `era_length_years` years. Every lookup that
/// takes a year inside an era (`year_of_era`, `day_of_year`) works in
/// era-relative years starting at 0.
///
/// Invariants:
/// - `month_lengths(y)` sums to `days_in_year(y)` for every year
/// - `era_length_days()` equals `days_in_year` summed over `0..era_length_years()`
pub trait Calendar {
    /// Name reported in [`DateParts::calendar`](crate::DateParts)
    fn name(&self) -> &'static str;

    /// Years in one era
    fn era_length_years(&self) -> i64;

    /// Signed days between the calendar's day zero and the Unix epoch
    fn days_to_epoch(&self) -> i64;

    fn is_leap_year(&self, year: i64) -> bool;

    /// Ordered day counts of the months of `year`
    fn month_lengths(&self, year: i64) -> Cow<'static, [u8]>;

    fn days_in_year(&self, year: i64) -> i64 {
        self.month_lengths(year).iter().map(|&d| i64::from(d)).sum()
    }

    /// Days in one era
    fn era_length_days(&self) -> i64 {
        (0..self.era_length_years())
            .map(|year| self.days_in_year(year))
            .sum()
    }

    /// Era-relative year containing the era-relative day `days_into_era`.
    ///
    /// Scans years until the cumulative day count would pass `days_into_era`.
    fn year_of_era(&self, days_into_era: i64) -> i64 {
        let mut year = 0;
        let mut days = 0;
        while year < self.era_length_years() {
            let len = self.days_in_year(year);
            if days + len > days_into_era {
                break;
            }
            days += len;
            year += 1;
        }
        year
    }

    /// Zero-based day offset within era-relative year `year_of_era`
    fn day_of_year(&self, days_into_era: i64, year_of_era: i64) -> i64 {
        let before: i64 = (0..year_of_era).map(|year| self.days_in_year(year)).sum();
        days_into_era - before
    }

    /// Time-of-day radices
    fn clock(&self) -> ClockShape {
        ClockShape::TERRESTRIAL
    }

    /// Literal day length in milliseconds, overriding the clock product
    fn millis_per_day(&self) -> Option<f64> {
        None
    }

    fn epoch_scale(&self) -> EpochScale {
        EpochScale::Identity
    }
}

impl<C: Calendar + ?Sized> Calendar for &C {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn era_length_years(&self) -> i64 {
        (**self).era_length_years()
    }

    fn days_to_epoch(&self) -> i64 {
        (**self).days_to_epoch()
    }

    fn is_leap_year(&self, year: i64) -> bool {
        (**self).is_leap_year(year)
    }

    fn month_lengths(&self, year: i64) -> Cow<'static, [u8]> {
        (**self).month_lengths(year)
    }

    fn days_in_year(&self, year: i64) -> i64 {
        (**self).days_in_year(year)
    }

    fn era_length_days(&self) -> i64 {
        (**self).era_length_days()
    }

    fn year_of_era(&self, days_into_era: i64) -> i64 {
        (**self).year_of_era(days_into_era)
    }

    fn day_of_year(&self, days_into_era: i64, year_of_era: i64) -> i64 {
        (**self).day_of_year(days_into_era, year_of_era)
    }

    fn clock(&self) -> ClockShape {
        (**self).clock()
    }

    fn millis_per_day(&self) -> Option<f64> {
        (**self).millis_per_day()
    }

    fn epoch_scale(&self) -> EpochScale {
        (**self).epoch_scale()
    }
}

/// The calendars shipped with the crate, selectable by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarKind {
    #[default]
    #[display(fmt = "gregorian")]
    Gregorian,
    #[display(fmt = "ordo13")]
    Ordo13,
    #[display(fmt = "amc_msd")]
    AmcMsd,
}

impl CalendarKind {
    pub const ALL: [Self; 3] = [Self::Gregorian, Self::Ordo13, Self::AmcMsd];

    fn inner(self) -> &'static dyn Calendar {
        match self {
            Self::Gregorian => &Gregorian,
            Self::Ordo13 => &Ordo13,
            Self::AmcMsd => &AmcMsd,
        }
    }
}

impl FromStr for CalendarKind {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CalendarError::UnknownCalendar(trimmed.to_owned()))
    }
}

impl Calendar for CalendarKind {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn era_length_years(&self) -> i64 {
        self.inner().era_length_years()
    }

    fn days_to_epoch(&self) -> i64 {
        self.inner().days_to_epoch()
    }

    fn is_leap_year(&self, year: i64) -> bool {
        self.inner().is_leap_year(year)
    }

    fn month_lengths(&self, year: i64) -> Cow<'static, [u8]> {
        self.inner().month_lengths(year)
    }

    fn days_in_year(&self, year: i64) -> i64 {
        self.inner().days_in_year(year)
    }

    fn era_length_days(&self) -> i64 {
        self.inner().era_length_days()
    }

    fn year_of_era(&self, days_into_era: i64) -> i64 {
        self.inner().year_of_era(days_into_era)
    }

    fn day_of_year(&self, days_into_era: i64, year_of_era: i64) -> i64 {
        self.inner().day_of_year(days_into_era, year_of_era)
    }

    fn clock(&self) -> ClockShape {
        self.inner().clock()
    }

    fn millis_per_day(&self) -> Option<f64> {
        self.inner().millis_per_day()
    }

    fn epoch_scale(&self) -> EpochScale {
        self.inner().epoch_scale()
    }
}
