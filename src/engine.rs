//! Timestamp ⇄ date-parts conversion and calendar arithmetic over any [`Calendar`].

use crate::consts::{MAX_EXACT_INTEGER, ROUNDING_SLACK_MILLIS};
use crate::normalize::{NormalizedParts, TimeOfDay};
use crate::{
    Calendar, CalendarError, CalendarKind, ClockShape, DateParts, Delta, EpochScale,
    PartialDateParts, TimezoneOffset,
};
use std::borrow::Cow;
use tracing::{trace, warn};

/// Conversion between a date-parts representation and a timestamp.
///
/// This is the seam a Date-like wrapper overrides: it keeps the timestamp and
/// delegates both directions to a chosen engine.
pub trait TimestampCodec {
    /// Decomposes a timestamp in milliseconds into date parts.
    ///
    /// # Errors
    /// Returns a [`CalendarError`] only for an inconsistent calendar description.
    fn to_date_parts(&self, timestamp: f64) -> Result<DateParts, CalendarError>;

    /// Builds a timestamp in milliseconds from date parts.
    ///
    /// # Errors
    /// Returns a [`CalendarError`] only for an inconsistent calendar description.
    fn from_date_parts(&self, parts: &DateParts) -> Result<f64, CalendarError>;
}

/// A calendar engine: one [`Calendar`] plus the constants derived from it.
///
/// The engine holds no mutable state, so it can be shared freely across threads.
/// Year lengths repeat every era: the month table and length of year `y` are
/// those of era-relative year `y mod years_in_era`, which keeps both conversion
/// directions consistent with the fixed era length.
#[derive(Debug, Clone)]
pub struct CalendarEngine<C = CalendarKind> {
    calendar: C,
    name: &'static str,
    years_in_era: i64,
    days_in_era: i64,
    days_to_epoch: i64,
    months_per_year: usize,
    clock: ClockShape,
    millis_per_day: f64,
    /// Real milliseconds per clock millisecond
    clock_ratio: f64,
    exact_clock: bool,
    scale: EpochScale,
}

impl CalendarEngine<CalendarKind> {
    /// Gregorian engine
    pub fn gregorian() -> Self {
        Self::new(CalendarKind::Gregorian)
    }

    /// 13-month Ordo engine
    pub fn ordo13() -> Self {
        Self::new(CalendarKind::Ordo13)
    }

    /// Martian sol (AMC) engine
    pub fn amc_msd() -> Self {
        Self::new(CalendarKind::AmcMsd)
    }

    /// Engine for a calendar looked up by name
    ///
    /// # Errors
    /// Returns `CalendarError::UnknownCalendar` if no calendar has that name.
    pub fn by_name(name: &str) -> Result<Self, CalendarError> {
        Ok(Self::new(name.parse()?))
    }
}

impl From<CalendarKind> for CalendarEngine<CalendarKind> {
    fn from(kind: CalendarKind) -> Self {
        Self::new(kind)
    }
}

impl<C: Calendar + Default> Default for CalendarEngine<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C: Calendar> CalendarEngine<C> {
    /// Wraps a calendar without checking its invariants.
    pub fn new(calendar: C) -> Self {
        let clock = calendar.clock();
        let clock_millis_per_day = clock.millis_per_day();
        let millis_per_day = calendar.millis_per_day().unwrap_or(clock_millis_per_day);
        let clock_ratio = millis_per_day / clock_millis_per_day;
        let engine = Self {
            name: calendar.name(),
            years_in_era: calendar.era_length_years(),
            days_in_era: calendar.era_length_days(),
            days_to_epoch: calendar.days_to_epoch(),
            months_per_year: calendar.month_lengths(0).len(),
            clock,
            millis_per_day,
            clock_ratio,
            exact_clock: millis_per_day.fract() == 0.0 && clock_ratio == 1.0,
            scale: calendar.epoch_scale(),
            calendar,
        };
        trace!(
            calendar = engine.name,
            years_in_era = engine.years_in_era,
            days_in_era = engine.days_in_era,
            millis_per_day = engine.millis_per_day,
            "calendar engine created"
        );
        engine
    }

    /// Wraps a calendar after checking its invariants.
    ///
    /// # Errors
    /// Returns the first invariant violation found by [`validate`](Self::validate).
    pub fn validated(calendar: C) -> Result<Self, CalendarError> {
        let engine = Self::new(calendar);
        engine.validate()?;
        Ok(engine)
    }

    /// Checks the calendar description for internal consistency.
    ///
    /// Every era-relative year must have the same month count, no empty
    /// month, a month table summing to the year length, and the years of an
    /// era must sum to the era length.
    ///
    /// # Errors
    /// Returns the first violated invariant.
    #[tracing::instrument(skip(self), fields(calendar = self.name))]
    pub fn validate(&self) -> Result<(), CalendarError> {
        if !(self.millis_per_day.is_finite() && self.millis_per_day > 0.0) {
            return Err(CalendarError::InvalidDayLength {
                millis_per_day: self.millis_per_day,
            });
        }
        if self.years_in_era <= 0 {
            return Err(CalendarError::InvalidEraLength {
                years: self.years_in_era,
            });
        }

        let mut era_days = 0;
        for year in 0..self.years_in_era {
            let months = self.calendar.month_lengths(year);
            if months.len() != self.months_per_year || months.is_empty() {
                return Err(CalendarError::MonthCountMismatch {
                    year,
                    expected: self.months_per_year,
                    actual: months.len(),
                });
            }
            if let Some(month) = months.iter().position(|&d| d == 0) {
                return Err(CalendarError::EmptyMonth { year, month });
            }
            let table_days: i64 = months.iter().map(|&d| i64::from(d)).sum();
            let year_days = self.calendar.days_in_year(year);
            if table_days != year_days {
                return Err(CalendarError::YearLengthMismatch {
                    year,
                    expected: year_days,
                    actual: table_days,
                });
            }
            era_days += year_days;
        }

        if era_days != self.days_in_era {
            return Err(CalendarError::EraLengthMismatch {
                years: self.years_in_era,
                expected: self.days_in_era,
                actual: era_days,
            });
        }
        Ok(())
    }

    /// The wrapped calendar
    pub const fn calendar(&self) -> &C {
        &self.calendar
    }

    pub const fn calendar_name(&self) -> &'static str {
        self.name
    }

    pub const fn days_in_era(&self) -> i64 {
        self.days_in_era
    }

    pub const fn years_in_era(&self) -> i64 {
        self.years_in_era
    }

    pub const fn days_to_epoch(&self) -> i64 {
        self.days_to_epoch
    }

    /// Real milliseconds in one calendar day
    pub const fn millis_per_day(&self) -> f64 {
        self.millis_per_day
    }

    pub const fn months_per_year(&self) -> usize {
        self.months_per_year
    }

    pub const fn clock(&self) -> ClockShape {
        self.clock
    }

    pub const fn epoch_scale(&self) -> EpochScale {
        self.scale
    }

    // --- era bookkeeping ---

    pub fn era_index_from_days(&self, days: i64) -> i64 {
        days.div_euclid(self.days_in_era.max(1))
    }

    pub fn era_index_from_year(&self, year: i64) -> i64 {
        year.div_euclid(self.years_in_era.max(1))
    }

    /// Era-relative year, always in `0..years_in_era`
    pub fn year_index_in_era(&self, year: i64) -> i64 {
        year.rem_euclid(self.years_in_era.max(1))
    }

    /// Days elapsed since the start of the era containing day `days`
    pub fn days_into_era(&self, days: i64) -> i64 {
        days.rem_euclid(self.days_in_era.max(1))
    }

    pub const fn total_days_before_era(&self, eras: i64) -> i64 {
        eras.saturating_mul(self.days_in_era)
    }

    pub const fn total_years_before_era(&self, eras: i64) -> i64 {
        eras.saturating_mul(self.years_in_era)
    }

    pub fn millis_in_days(&self, days: f64) -> f64 {
        days * self.millis_per_day
    }

    pub fn days_in_millis(&self, millis: f64) -> f64 {
        millis / self.millis_per_day
    }

    pub fn total_months_before_year(&self, year: i64) -> i64 {
        year.saturating_mul(self.months_per_year as i64)
    }

    pub fn year_from_total_months(&self, months: i64) -> i64 {
        months.div_euclid(self.months_per_year.max(1) as i64)
    }

    /// Month index in `0..months_per_year`
    pub fn month_index_in_year(&self, months: i64) -> usize {
        months.rem_euclid(self.months_per_year.max(1) as i64) as usize
    }

    // --- year and month lookups ---

    /// Month table the engine uses for `year`
    pub fn month_lengths(&self, year: i64) -> Cow<'static, [u8]> {
        self.calendar.month_lengths(self.year_index_in_era(year))
    }

    /// The calendar's own leap rule for `year`
    pub fn is_leap_year(&self, year: i64) -> bool {
        self.calendar.is_leap_year(year)
    }

    /// Whether the engine gives `year` the leap-year length of its era position.
    ///
    /// Differs from [`is_leap_year`](Self::is_leap_year) only where the leap rule
    /// does not repeat every era, such as Gregorian year 3200.
    pub fn has_leap_length(&self, year: i64) -> bool {
        self.calendar.is_leap_year(self.year_index_in_era(year))
    }

    pub fn days_in_year(&self, year: i64) -> i64 {
        self.calendar.days_in_year(self.year_index_in_era(year))
    }

    /// Length of `month` of `year`, after rolling an out-of-range month into its year
    pub fn days_in_month(&self, year: i64, month: i64) -> u8 {
        let (year, month) = self.roll_month(year, month);
        self.month_lengths(year).get(month).copied().unwrap_or(0)
    }

    /// Days in `year`, or only those before `month` when given
    pub fn total_days(&self, year: i64, month: Option<usize>) -> i64 {
        let months = self.month_lengths(year);
        let end = month.unwrap_or(months.len()).min(months.len());
        months[..end].iter().map(|&d| i64::from(d)).sum()
    }

    // --- conversion ---

    /// Decomposes a timestamp into date parts.
    ///
    /// A NaN or infinite timestamp gives all-NaN parts.
    ///
    /// # Errors
    /// Returns `CalendarError::DayOfYearOutOfRange` when the calendar's
    /// day-of-year lookup lands outside its own month table.
    pub fn to_date_parts(&self, timestamp: f64) -> Result<DateParts, CalendarError> {
        if !timestamp.is_finite() {
            return Ok(DateParts::nan(self.name));
        }
        let (days, time) = self.day_and_time(timestamp);
        if !days.is_finite() || days.abs() > MAX_EXACT_INTEGER {
            return Ok(DateParts::nan(self.name));
        }

        let (year, month, date) = self.date_from_days(days as i64)?;

        Ok(DateParts {
            calendar: Cow::Borrowed(self.name),
            year: year as f64,
            month: month as f64,
            date: date as f64,
            hour: time.hour,
            minute: time.minute,
            second: time.second,
            millisecond: time.millisecond,
        })
    }

    /// Builds a timestamp from date parts, normalizing out-of-range fields first.
    ///
    /// Any NaN or infinite field gives NaN, as does a field too large to be
    /// held exactly.
    ///
    /// # Errors
    /// Returns `CalendarError::NormalizationDiverged` when day normalization
    /// does not settle, which only happens for a broken month table.
    pub fn from_date_parts(&self, parts: &DateParts) -> Result<f64, CalendarError> {
        if !parts.is_finite() || !is_representable(parts) {
            return Ok(f64::NAN);
        }
        let normalized = self.normalize_fields(parts)?;
        Ok(self.encode(&normalized))
    }

    /// Adds a calendar-aware offset to a timestamp.
    ///
    /// Years and months move along the calendar (a month overflowing its day
    /// count rolls into the next one); days and smaller units are added as
    /// elapsed time.
    ///
    /// # Errors
    /// Propagates errors from [`to_date_parts`](Self::to_date_parts) and
    /// [`from_date_parts`](Self::from_date_parts).
    pub fn add(&self, timestamp: f64, delta: &Delta) -> Result<f64, CalendarError> {
        if !delta.is_finite() {
            return Ok(f64::NAN);
        }
        let parts = self.to_date_parts(timestamp)?;
        if parts.is_nan() {
            return Ok(f64::NAN);
        }

        let mut year = parts.year + delta.years.unwrap_or(0.0);
        let mut month = parts.month;
        if let Some(months) = delta.months.filter(|&m| m != 0.0) {
            let (y, m) = self.normalize_month(year, month + months);
            year = y as f64;
            month = m as f64;
        }

        let base = self.from_date_parts(&DateParts {
            year,
            month,
            ..parts
        })?;
        let elapsed = self.millis_in_days(delta.days.unwrap_or(0.0)) + self.delta_time_millis(delta);
        Ok(self.scale.to_epoch(self.scale.from_epoch(base) + elapsed))
    }

    /// Subtracts a calendar-aware offset; [`add`](Self::add) with every field negated.
    ///
    /// # Errors
    /// Same as [`add`](Self::add).
    pub fn sub(&self, timestamp: f64, delta: &Delta) -> Result<f64, CalendarError> {
        self.add(timestamp, &-*delta)
    }

    /// Replaces the supplied fields of a timestamp's date parts.
    ///
    /// # Errors
    /// Same as [`from_date_parts`](Self::from_date_parts).
    pub fn set(&self, timestamp: f64, patch: &PartialDateParts) -> Result<f64, CalendarError> {
        let current = self.to_date_parts(timestamp)?;
        self.from_date_parts(&patch.overlay(&current))
    }

    /// Date parts as seen at a fixed offset from UTC.
    ///
    /// # Errors
    /// Same as [`to_date_parts`](Self::to_date_parts).
    pub fn to_local_date_parts(
        &self,
        timestamp: f64,
        offset: TimezoneOffset,
    ) -> Result<DateParts, CalendarError> {
        self.to_date_parts(timestamp - offset.as_millis())
    }

    /// Timestamp of date parts given in local time at a fixed offset from UTC.
    ///
    /// # Errors
    /// Same as [`from_date_parts`](Self::from_date_parts).
    pub fn from_local_date_parts(
        &self,
        parts: &DateParts,
        offset: TimezoneOffset,
    ) -> Result<f64, CalendarError> {
        Ok(self.from_date_parts(parts)? + offset.as_millis())
    }

    /// True when both timestamps fall on the same calendar day
    pub fn is_same_day(&self, a: f64, b: f64) -> bool {
        if !(a.is_finite() && b.is_finite()) {
            return false;
        }
        self.day_and_time(a).0 == self.day_and_time(b).0
    }

    // --- internals ---

    /// Day index since the epoch and time of day in clock units
    fn day_and_time(&self, timestamp: f64) -> (f64, TimeOfDay) {
        let raw = self.scale.from_epoch(timestamp);
        let slack = self.rounding_slack(raw);
        let (days, millis_of_day) = floor_div(raw, self.millis_per_day, slack);
        let (carry, time) = self.split_clock_millis(
            millis_of_day / self.clock_ratio,
            slack / self.clock_ratio,
        );
        (days + carry as f64, time)
    }

    /// Year, month index and 1-based date of a day counted from the Unix epoch.
    fn date_from_days(&self, days_since_epoch: i64) -> Result<(i64, usize, i64), CalendarError> {
        let native_days = days_since_epoch + self.days_to_epoch;
        let era = self.era_index_from_days(native_days);
        let days_into_era = native_days - self.total_days_before_era(era);

        let year_of_era = self.calendar.year_of_era(days_into_era);
        let year = self.total_years_before_era(era) + year_of_era;
        let day_of_year = self.calendar.day_of_year(days_into_era, year_of_era);

        if day_of_year >= 0 {
            let mut remaining = day_of_year;
            for (index, &length) in self.month_lengths(year).iter().enumerate() {
                let length = i64::from(length);
                if remaining < length {
                    return Ok((year, index, remaining + 1));
                }
                remaining -= length;
            }
        }

        warn!(
            calendar = self.name,
            year, day_of_year, "day of year falls outside the month table"
        );
        Err(CalendarError::DayOfYearOutOfRange {
            calendar: self.name,
            year,
            day_of_year,
        })
    }

    /// Timestamp of already-normalized parts
    fn encode(&self, parts: &NormalizedParts) -> f64 {
        let era = self.era_index_from_year(parts.year);
        let year_of_era = self.year_index_in_era(parts.year);
        let days_before_year: i64 = (0..year_of_era)
            .map(|year| self.calendar.days_in_year(year))
            .sum();
        let days_before_month = self.total_days(parts.year, Some(parts.month));

        let days = (era as f64).mul_add(
            self.days_in_era as f64,
            (days_before_year + days_before_month - self.days_to_epoch) as f64,
        ) + parts.date
            - 1.0;
        let raw = self.millis_in_days(days) + self.time_to_millis(&parts.time);
        self.scale.to_epoch(raw)
    }

    /// Real milliseconds of a canonical time of day
    pub(crate) fn time_to_millis(&self, time: &TimeOfDay) -> f64 {
        self.clock
            .to_millis(time.hour, time.minute, time.second, time.millisecond)
            * self.clock_ratio
    }

    /// Real milliseconds of the sub-day fields of a delta
    fn delta_time_millis(&self, delta: &Delta) -> f64 {
        let clock = self.clock;
        let clock_millis = delta.hours.unwrap_or(0.0) * clock.millis_per_hour()
            + delta.minutes.unwrap_or(0.0) * clock.millis_per_minute()
            + delta.seconds.unwrap_or(0.0) * clock.millis_per_second()
            + delta.milliseconds.unwrap_or(0.0);
        clock_millis * self.clock_ratio
    }

    /// Fixed-radix split of clock milliseconds within one day.
    ///
    /// A remainder that reaches a full day within `slack` comes back as one
    /// carried day and midnight, so `hour` stays below `hours_per_day`.
    pub(crate) fn split_clock_millis(&self, clock_millis: f64, slack: f64) -> (i64, TimeOfDay) {
        let (hour, rest) = floor_div(clock_millis, self.clock.millis_per_hour(), slack);
        if hour >= f64::from(self.clock.hours_per_day) {
            return (1, TimeOfDay::MIDNIGHT);
        }
        let (minute, rest) = floor_div(rest, self.clock.millis_per_minute(), slack);
        let (second, rest) = floor_div(rest, self.clock.millis_per_second(), slack);
        let time = TimeOfDay {
            hour,
            minute,
            second,
            millisecond: snap(rest, slack),
        };
        (0, time)
    }

    /// Tolerance for representation error at unit boundaries; zero for clocks
    /// that divide the day into whole milliseconds.
    fn rounding_slack(&self, magnitude: f64) -> f64 {
        if self.exact_clock {
            0.0
        } else {
            ROUNDING_SLACK_MILLIS.max(magnitude.abs() * f64::EPSILON * 4.0)
        }
    }
}

impl<C: Calendar> TimestampCodec for CalendarEngine<C> {
    fn to_date_parts(&self, timestamp: f64) -> Result<DateParts, CalendarError> {
        Self::to_date_parts(self, timestamp)
    }

    fn from_date_parts(&self, parts: &DateParts) -> Result<f64, CalendarError> {
        Self::from_date_parts(self, parts)
    }
}

/// Floor division returning a non-negative remainder. Values within `slack`
/// below a boundary count as reaching it.
pub(crate) fn floor_div(value: f64, unit: f64, slack: f64) -> (f64, f64) {
    let quotient = ((value + slack) / unit).floor();
    let remainder = quotient.mul_add(-unit, value).max(0.0);
    (quotient, remainder)
}

fn snap(value: f64, slack: f64) -> f64 {
    let rounded = value.round();
    if (value - rounded).abs() <= slack {
        rounded
    } else {
        value
    }
}

fn is_representable(parts: &DateParts) -> bool {
    [
        parts.year,
        parts.month,
        parts.date,
        parts.hour,
        parts.minute,
        parts.second,
        parts.millisecond,
    ]
    .iter()
    .all(|v| v.abs() <= MAX_EXACT_INTEGER)
}
