//! Overflow and underflow resolution for date parts.
//!
//! Time fields are folded into clock milliseconds and split again, the
//! `(year, month)` pair is flattened into a month count, and the day is moved
//! across month boundaries by two bounded passes: forward while it exceeds its
//! month, then backward while it is not positive.

use crate::consts::MAX_NORMALIZE_ITERATIONS;
use crate::engine::floor_div;
use crate::{Calendar, CalendarEngine, CalendarError, DateParts, RollDirection};
use std::borrow::Cow;
use tracing::{trace, warn};

/// Canonical time of day in clock units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TimeOfDay {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
    pub millisecond: f64,
}

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self {
        hour: 0.0,
        minute: 0.0,
        second: 0.0,
        millisecond: 0.0,
    };
}

/// Date parts with every field in range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NormalizedParts {
    pub year: i64,
    pub month: usize,
    pub date: f64,
    pub time: TimeOfDay,
}

impl NormalizedParts {
    fn into_date_parts(self, calendar: Cow<'static, str>) -> DateParts {
        DateParts {
            calendar,
            year: self.year as f64,
            month: self.month as f64,
            date: self.date,
            hour: self.time.hour,
            minute: self.time.minute,
            second: self.time.second,
            millisecond: self.time.millisecond,
        }
    }
}

/// Position of a day while it is being rolled across months.
#[derive(Debug, Clone, Copy)]
struct DayCursor {
    year: i64,
    month: usize,
    date: f64,
}

impl<C: Calendar> CalendarEngine<C> {
    /// Brings every field of `parts` into its canonical range without moving
    /// the instant they describe.
    ///
    /// Non-finite parts come back as all-NaN parts.
    ///
    /// # Errors
    /// Returns `CalendarError::NormalizationDiverged` if the day is still
    /// outside its month after `MAX_NORMALIZE_ITERATIONS` rolls in one direction.
    pub fn normalize(&self, parts: &DateParts) -> Result<DateParts, CalendarError> {
        if !parts.is_finite() {
            return Ok(DateParts::nan(parts.calendar.clone()));
        }
        Ok(self
            .normalize_fields(parts)?
            .into_date_parts(parts.calendar.clone()))
    }

    pub(crate) fn normalize_fields(
        &self,
        parts: &DateParts,
    ) -> Result<NormalizedParts, CalendarError> {
        let clock = self.clock();
        let clock_millis = clock.to_millis(parts.hour, parts.minute, parts.second, parts.millisecond);
        let (overflow_days, clock_of_day) = floor_div(clock_millis, clock.millis_per_day(), 0.0);
        let (carry, time) = self.split_clock_millis(clock_of_day, 0.0);

        let (year, month) = self.normalize_month(parts.year, parts.month);
        let cursor = DayCursor {
            year,
            month,
            date: parts.date + overflow_days + carry as f64,
        };
        let cursor = self.roll_days_backward(self.roll_days_forward(cursor)?)?;

        Ok(NormalizedParts {
            year: cursor.year,
            month: cursor.month,
            date: cursor.date,
            time,
        })
    }

    /// Canonical `(year, month)` for a possibly out-of-range month.
    ///
    /// Fractional input is floored to a whole month count.
    pub(crate) fn normalize_month(&self, year: f64, month: f64) -> (i64, usize) {
        let per_year = self.months_per_year() as f64;
        let total_months = year.mul_add(per_year, month).floor() as i64;
        (
            self.year_from_total_months(total_months),
            self.month_index_in_year(total_months),
        )
    }

    pub(crate) fn roll_month(&self, year: i64, month: i64) -> (i64, usize) {
        let total_months = self.total_months_before_year(year).saturating_add(month);
        (
            self.year_from_total_months(total_months),
            self.month_index_in_year(total_months),
        )
    }

    fn month_length(&self, year: i64, month: usize) -> f64 {
        f64::from(self.month_lengths(year).get(month).copied().unwrap_or(0))
    }

    fn roll_days_forward(&self, mut cursor: DayCursor) -> Result<DayCursor, CalendarError> {
        for rolls in 0..=MAX_NORMALIZE_ITERATIONS {
            let length = self.month_length(cursor.year, cursor.month);
            if cursor.date <= length {
                if rolls > 0 {
                    trace!(rolls, year = cursor.year, month = cursor.month, "days rolled forward");
                }
                return Ok(cursor);
            }
            if rolls == MAX_NORMALIZE_ITERATIONS {
                break;
            }
            cursor.date -= length;
            (cursor.year, cursor.month) = self.roll_month(cursor.year, cursor.month as i64 + 1);
        }
        Err(self.diverged(RollDirection::Forward, cursor))
    }

    fn roll_days_backward(&self, mut cursor: DayCursor) -> Result<DayCursor, CalendarError> {
        for rolls in 0..=MAX_NORMALIZE_ITERATIONS {
            if cursor.date > 0.0 {
                if rolls > 0 {
                    trace!(rolls, year = cursor.year, month = cursor.month, "days rolled backward");
                }
                return Ok(cursor);
            }
            if rolls == MAX_NORMALIZE_ITERATIONS {
                break;
            }
            (cursor.year, cursor.month) = self.roll_month(cursor.year, cursor.month as i64 - 1);
            cursor.date += self.month_length(cursor.year, cursor.month);
        }
        Err(self.diverged(RollDirection::Backward, cursor))
    }

    fn diverged(&self, direction: RollDirection, cursor: DayCursor) -> CalendarError {
        warn!(
            calendar = self.calendar_name(),
            %direction,
            year = cursor.year,
            month = cursor.month,
            date = cursor.date,
            "day normalization did not settle"
        );
        CalendarError::NormalizationDiverged {
            direction,
            limit: MAX_NORMALIZE_ITERATIONS,
        }
    }
}
