use crate::consts::{
    HOURS_PER_DAY, MILLIS_PER_MINUTE, MILLIS_PER_SECOND, MINUTES_PER_HOUR, SECONDS_PER_MINUTE,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::ops::Neg;

/// An instant decomposed into the fields of one calendar.
///
/// `month` is 0-based and `date` is 1-based, matching the Date API. Fields are
/// `f64` so that an invalid instant propagates as NaN instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateParts {
    pub calendar: Cow<'static, str>,
    pub year: f64,
    pub month: f64,
    pub date: f64,
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
    pub millisecond: f64,
}

impl DateParts {
    /// Creates parts at midnight of the given day
    pub fn new(calendar: impl Into<Cow<'static, str>>, year: f64, month: f64, date: f64) -> Self {
        Self {
            calendar: calendar.into(),
            year,
            month,
            date,
            hour: 0.0,
            minute: 0.0,
            second: 0.0,
            millisecond: 0.0,
        }
    }

    /// Replaces the time-of-day fields
    #[must_use]
    pub fn with_time(mut self, hour: f64, minute: f64, second: f64, millisecond: f64) -> Self {
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self.millisecond = millisecond;
        self
    }

    /// Parts with every numeric field set to NaN.
    pub fn nan(calendar: impl Into<Cow<'static, str>>) -> Self {
        Self::new(calendar, f64::NAN, f64::NAN, f64::NAN).with_time(
            f64::NAN,
            f64::NAN,
            f64::NAN,
            f64::NAN,
        )
    }

    fn fields(&self) -> [f64; 7] {
        [
            self.year,
            self.month,
            self.date,
            self.hour,
            self.minute,
            self.second,
            self.millisecond,
        ]
    }

    /// True when every numeric field is finite
    pub fn is_finite(&self) -> bool {
        self.fields().iter().all(|v| v.is_finite())
    }

    /// True when any numeric field is NaN
    pub fn is_nan(&self) -> bool {
        self.fields().iter().any(|v| v.is_nan())
    }
}

impl fmt::Display for DateParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_finite() {
            return write!(f, "Invalid Date ({})", self.calendar);
        }
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03} ({})",
            self.year,
            self.month + 1.0,
            self.date,
            self.hour,
            self.minute,
            self.second,
            self.millisecond.trunc(),
            self.calendar
        )
    }
}

/// A field-sparse overlay applied by [`CalendarEngine::set`](crate::CalendarEngine::set).
///
/// Fields left as `None` keep the value of the timestamp being modified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialDateParts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub millisecond: Option<f64>,
}

impl PartialDateParts {
    /// Overlays the supplied fields onto `base`
    pub fn overlay(&self, base: &DateParts) -> DateParts {
        DateParts {
            calendar: base.calendar.clone(),
            year: self.year.unwrap_or(base.year),
            month: self.month.unwrap_or(base.month),
            date: self.date.unwrap_or(base.date),
            hour: self.hour.unwrap_or(base.hour),
            minute: self.minute.unwrap_or(base.minute),
            second: self.second.unwrap_or(base.second),
            millisecond: self.millisecond.unwrap_or(base.millisecond),
        }
    }
}

impl From<&DateParts> for PartialDateParts {
    fn from(parts: &DateParts) -> Self {
        Self {
            year: Some(parts.year),
            month: Some(parts.month),
            date: Some(parts.date),
            hour: Some(parts.hour),
            minute: Some(parts.minute),
            second: Some(parts.second),
            millisecond: Some(parts.millisecond),
        }
    }
}

/// A signed additive offset. Omitted fields count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milliseconds: Option<f64>,
}

impl Delta {
    /// A delta with every field omitted
    pub const ZERO: Self = Self {
        years: None,
        months: None,
        days: None,
        hours: None,
        minutes: None,
        seconds: None,
        milliseconds: None,
    };

    /// A delta of whole years
    pub const fn years(years: f64) -> Self {
        Self {
            years: Some(years),
            ..Self::ZERO
        }
    }

    /// A delta of whole months
    pub const fn months(months: f64) -> Self {
        Self {
            months: Some(months),
            ..Self::ZERO
        }
    }

    /// A delta of days
    pub const fn days(days: f64) -> Self {
        Self {
            days: Some(days),
            ..Self::ZERO
        }
    }

    /// True when no supplied field is NaN or infinite
    pub fn is_finite(&self) -> bool {
        [
            self.years,
            self.months,
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
            self.milliseconds,
        ]
        .into_iter()
        .flatten()
        .all(f64::is_finite)
    }
}

fn negate(value: Option<f64>) -> Option<f64> {
    // zero stays positive zero
    value.map(|v| if v == 0.0 { 0.0 } else { -v })
}

impl Neg for Delta {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            years: negate(self.years),
            months: negate(self.months),
            days: negate(self.days),
            hours: negate(self.hours),
            minutes: negate(self.minutes),
            seconds: negate(self.seconds),
            milliseconds: negate(self.milliseconds),
        }
    }
}

/// The radices of a calendar's time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockShape {
    pub hours_per_day: u32,
    pub minutes_per_hour: u32,
    pub seconds_per_minute: u32,
    pub millis_per_second: u32,
}

impl ClockShape {
    /// 24 hours of 60 minutes of 60 seconds of 1000 milliseconds
    pub const TERRESTRIAL: Self = Self {
        hours_per_day: HOURS_PER_DAY,
        minutes_per_hour: MINUTES_PER_HOUR,
        seconds_per_minute: SECONDS_PER_MINUTE,
        millis_per_second: MILLIS_PER_SECOND,
    };

    /// Clock milliseconds in one second
    pub fn millis_per_second(&self) -> f64 {
        f64::from(self.millis_per_second)
    }

    /// Clock milliseconds in one minute
    pub fn millis_per_minute(&self) -> f64 {
        self.millis_per_second() * f64::from(self.seconds_per_minute)
    }

    /// Clock milliseconds in one hour
    pub fn millis_per_hour(&self) -> f64 {
        self.millis_per_minute() * f64::from(self.minutes_per_hour)
    }

    /// Clock milliseconds in one day
    pub fn millis_per_day(&self) -> f64 {
        self.millis_per_hour() * f64::from(self.hours_per_day)
    }

    /// Sums time-of-day fields into clock milliseconds
    pub fn to_millis(&self, hour: f64, minute: f64, second: f64, millisecond: f64) -> f64 {
        hour * self.millis_per_hour()
            + minute * self.millis_per_minute()
            + second * self.millis_per_second()
            + millisecond
    }
}

impl Default for ClockShape {
    fn default() -> Self {
        Self::TERRESTRIAL
    }
}

/// Transform between raw milliseconds and a calendar's own epoch value.
///
/// `to_epoch` is applied to the raw millisecond count built from date parts,
/// `from_epoch` to a timestamp before it is decomposed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EpochScale {
    #[default]
    Identity,
    /// `epoch = raw * factor + offset`
    Linear { factor: f64, offset: f64 },
}

impl EpochScale {
    /// Raw milliseconds to epoch value
    pub fn to_epoch(self, raw: f64) -> f64 {
        match self {
            Self::Identity => raw,
            Self::Linear { factor, offset } => raw.mul_add(factor, offset),
        }
    }

    /// Epoch value to raw milliseconds
    pub fn from_epoch(self, value: f64) -> f64 {
        match self {
            Self::Identity => value,
            Self::Linear { factor, offset } => (value - offset) / factor,
        }
    }
}

/// A fixed offset from UTC in minutes, signed like `Date.prototype.getTimezoneOffset`:
/// UTC minus local time, so UTC+3 is `-180`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deref,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct TimezoneOffset(i32);

impl TimezoneOffset {
    pub const UTC: Self = Self(0);

    /// Creates an offset from minutes
    pub const fn from_minutes(minutes: i32) -> Self {
        Self(minutes)
    }

    /// Returns the offset in minutes
    #[inline]
    pub const fn minutes(self) -> i32 {
        self.0
    }

    /// Returns the offset in milliseconds
    pub fn as_millis(self) -> f64 {
        f64::from(self.0) * MILLIS_PER_MINUTE
    }
}

/// Direction of a day-normalization pass, reported when a pass fails to settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RollDirection {
    #[display(fmt = "forward")]
    Forward,
    #[display(fmt = "backward")]
    Backward,
}
