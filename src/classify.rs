//! Splits a day's worked duration into pay buckets.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

use crate::error::EngineError;
use crate::model::classification::{Classification, DayType};

/// Company-scoped holiday lookup, supplied by the embedding application.
pub trait HolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// Calendar with no holidays at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// Calendar backed by an explicit set of dates.
#[derive(Debug, Clone, Default)]
pub struct FixedHolidays(pub BTreeSet<NaiveDate>);

impl FixedHolidays {
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self(dates.into_iter().collect())
    }
}

impl HolidayCalendar for FixedHolidays {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Classify one day's clock-in/out pair.
///
/// Either time missing yields an incomplete, all-zero classification.
/// Explicit holidays are their own bucket and take precedence over the
/// day-of-week check, so a holiday falling on a Saturday still pays at the
/// holiday multiplier. On weekdays, hours up to `standard_hours_per_day`
/// are regular and the excess is overtime.
pub fn classify<C: HolidayCalendar>(
    date: NaiveDate,
    clock_in: Option<NaiveTime>,
    clock_out: Option<NaiveTime>,
    calendar: &C,
    standard_hours_per_day: f64,
) -> Result<Classification, EngineError> {
    let (Some(start), Some(end)) = (clock_in, clock_out) else {
        return Ok(Classification::incomplete());
    };

    let total_hours = end.signed_duration_since(start).num_seconds() as f64 / 3600.0;
    if total_hours <= 0.0 {
        return Err(EngineError::InvalidDuration {
            clock_in: start,
            clock_out: end,
        });
    }

    if calendar.is_holiday(date) {
        return Ok(Classification {
            day_type: DayType::Holiday,
            regular_hours: 0.0,
            overtime_hours: 0.0,
            weekend_hours: 0.0,
            holiday_hours: total_hours,
            total_hours,
        });
    }

    if is_weekend(date) {
        return Ok(Classification {
            day_type: DayType::Weekend,
            regular_hours: 0.0,
            overtime_hours: 0.0,
            weekend_hours: total_hours,
            holiday_hours: 0.0,
            total_hours,
        });
    }

    let regular_hours = total_hours.min(standard_hours_per_day);
    let overtime_hours = (total_hours - standard_hours_per_day).max(0.0);

    Ok(Classification {
        day_type: DayType::Regular,
        regular_hours,
        overtime_hours,
        weekend_hours: 0.0,
        holiday_hours: 0.0,
        total_hours,
    })
}
