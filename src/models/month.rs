use chrono::{Datelike, Months, NaiveDate};

use crate::error::ValidationError;
use crate::projection::HORIZON_MONTHS;

/// Half-open range of month indices `[start, end)` inside the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MonthRange {
    pub(crate) start: u32,
    pub(crate) end: u32,
}

impl MonthRange {
    pub(crate) fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Every month of the horizon.
    pub(crate) fn whole() -> Self {
        Self::new(0, HORIZON_MONTHS)
    }

    /// Builds a range from optional bounds, defaulting to the horizon edges.
    pub(crate) fn bounded(start: Option<u32>, end: Option<u32>) -> Self {
        Self::new(start.unwrap_or(0), end.unwrap_or(HORIZON_MONTHS))
    }

    /// Clips a signed range to the horizon. Returns `None` when nothing is left.
    pub(crate) fn clipped(start: i64, end: i64) -> Option<Self> {
        let lo = start.max(0);
        let hi = end.min(i64::from(HORIZON_MONTHS));
        if lo >= hi {
            return None;
        }
        Some(Self::new(u32::try_from(lo).ok()?, u32::try_from(hi).ok()?))
    }

    pub(crate) fn contains(&self, month: u32) -> bool {
        self.start <= month && month < self.end
    }

    pub(crate) fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub(crate) fn is_whole(&self) -> bool {
        *self == Self::whole()
    }

    pub(crate) fn validate(&self, field: &str) -> Result<(), ValidationError> {
        if self.start >= self.end || self.end > HORIZON_MONTHS {
            return Err(ValidationError::InvalidRange {
                field: field.to_string(),
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for MonthRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_whole() {
            write!(f, "all")
        } else {
            write!(f, "{}..{}", self.start, self.end)
        }
    }
}

/// First day of the month containing `date`.
pub(crate) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Signed number of calendar months from `start`'s month to `date`'s month.
pub(crate) fn months_between(start: NaiveDate, date: NaiveDate) -> i64 {
    (i64::from(date.year()) - i64::from(start.year())) * 12 + i64::from(date.month())
        - i64::from(start.month())
}

/// Calendar month for a month index, or `None` past the end of the calendar.
pub(crate) fn month_date(start: NaiveDate, month: u32) -> Option<NaiveDate> {
    first_of_month(start).checked_add_months(Months::new(month))
}

/// Accepts a signed month offset only when it falls inside the horizon.
pub(crate) fn checked_month(field: &str, offset: i64) -> Result<u32, ValidationError> {
    match u32::try_from(offset) {
        Ok(month) if month < HORIZON_MONTHS => Ok(month),
        _ => Err(ValidationError::MonthOutOfHorizon {
            field: field.to_string(),
            month: offset,
        }),
    }
}

/// Converts a calendar month (1-12) to the plan month-of-year for a plan starting at `start`.
///
/// With a March start, March is plan month 1 and February is plan month 12.
pub(crate) fn plan_month_of_year(start: NaiveDate, calendar_month: u32) -> u32 {
    let offset = (calendar_month + 12 - start.month()) % 12;
    offset + 1
}

/// Inverse of [`plan_month_of_year`].
pub(crate) fn calendar_month_of(start: NaiveDate, plan_month: u32) -> u32 {
    (start.month() + plan_month + 10) % 12 + 1
}
