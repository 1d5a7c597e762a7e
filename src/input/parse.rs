use chrono::NaiveDate;
use regex::{Captures, Regex};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::ValidationError;
use crate::models::{checked_month, months_between, plan_month_of_year, MonthRange};

static MONTH_INDEX_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\+?(\d{1,4})$").ok());
static CALENDAR_MONTH_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{1,2})$").ok());
static DATE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{1,2})(?:-(\d{1,2}))?$").ok());
static RANGE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^@([^.\s]*)\.\.([^.\s]*)$").ok());

const MONTH_NAMES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

fn captures<'a>(re: &LazyLock<Option<Regex>>, s: &'a str) -> Option<Captures<'a>> {
    re.as_ref().and_then(|re| re.captures(s))
}

fn group<T: FromStr>(caps: &Captures<'_>, i: usize) -> Option<T> {
    caps.get(i).and_then(|m| m.as_str().parse().ok())
}

/// Parses a non-negative amount. Accepts `1234.5`, `1,234.50`, `$1,234.50` and `5k`.
pub(crate) fn parse_amount(field: &str, s: &str) -> Result<Decimal, ValidationError> {
    let malformed = || ValidationError::MalformedAmount {
        field: field.to_string(),
        input: s.to_string(),
    };

    let cleaned = s.trim().replace(['$', ','], "");
    let (digits, scale) = match cleaned.strip_suffix(['k', 'K']) {
        Some(rest) => (rest, Decimal::from(1000)),
        None => (cleaned.as_str(), Decimal::ONE),
    };
    if digits.is_empty() {
        return Err(malformed());
    }

    let value = Decimal::from_str(digits)
        .ok()
        .and_then(|d| d.checked_mul(scale))
        .ok_or_else(malformed)?;
    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount {
            field: field.to_string(),
            value,
        });
    }
    Ok(value)
}

/// Like [`parse_amount`] but allows a leading `-`, for balances that may be overdrawn.
pub(crate) fn parse_signed_amount(field: &str, s: &str) -> Result<Decimal, ValidationError> {
    let s = s.trim();
    match s.strip_prefix('-') {
        Some(rest) => parse_amount(field, rest).map(|v| -v),
        None => parse_amount(field, s),
    }
}

/// Signed month offset of a month spec: an index (`12`, `+12`) or a calendar month (`2026-03`).
fn month_offset(field: &str, s: &str, start: NaiveDate) -> Result<i64, ValidationError> {
    let s = s.trim();
    if let Some(index) = captures(&MONTH_INDEX_RE, s).and_then(|c| group::<i64>(&c, 1)) {
        return Ok(index);
    }
    if let Some(caps) = captures(&CALENDAR_MONTH_RE, s) {
        let year = group::<i32>(&caps, 1);
        let month = group::<u32>(&caps, 2);
        if let Some(date) = year
            .zip(month)
            .and_then(|(y, m)| NaiveDate::from_ymd_opt(y, m, 1))
        {
            return Ok(months_between(start, date));
        }
    }
    Err(ValidationError::MalformedMonth {
        field: field.to_string(),
        input: s.to_string(),
    })
}

/// Parses a month spec into a month index inside the horizon.
pub(crate) fn parse_month(field: &str, s: &str, start: NaiveDate) -> Result<u32, ValidationError> {
    checked_month(field, month_offset(field, s, start)?)
}

/// Parses `@FROM..TO` into a half-open range; either side may be left empty.
pub(crate) fn parse_range(
    field: &str,
    s: &str,
    start: NaiveDate,
) -> Result<MonthRange, ValidationError> {
    let caps = captures(&RANGE_RE, s.trim()).ok_or_else(|| ValidationError::MalformedMonth {
        field: field.to_string(),
        input: s.to_string(),
    })?;
    let bound = |i: usize| -> Result<Option<i64>, ValidationError> {
        match caps.get(i).map(|m| m.as_str()) {
            Some(text) if !text.is_empty() => month_offset(field, text, start).map(Some),
            _ => Ok(None),
        }
    };

    let from = match bound(1)? {
        Some(offset) => Some(checked_month(field, offset)?),
        None => None,
    };
    let to = match bound(2)? {
        Some(offset) => Some(u32::try_from(offset).map_err(|_| {
            ValidationError::MonthOutOfHorizon {
                field: field.to_string(),
                month: offset,
            }
        })?),
        None => None,
    };

    let range = MonthRange::bounded(from, to);
    range.validate(field)?;
    Ok(range)
}

/// Splits an `@FROM..TO` token off the end of a token list.
pub(crate) fn split_range<'a>(tokens: &[&'a str]) -> (Vec<&'a str>, Option<&'a str>) {
    match tokens.split_last() {
        Some((last, rest)) if last.starts_with('@') => (rest.to_vec(), Some(*last)),
        _ => (tokens.to_vec(), None),
    }
}

/// Parses `YYYY-MM-DD`, or `YYYY-MM` as the first of that month.
pub(crate) fn parse_date(field: &str, s: &str) -> Result<NaiveDate, ValidationError> {
    captures(&DATE_RE, s.trim())
        .and_then(|caps| {
            let year = group::<i32>(&caps, 1)?;
            let month = group::<u32>(&caps, 2)?;
            let day = group::<u32>(&caps, 3).unwrap_or(1);
            NaiveDate::from_ymd_opt(year, month, day)
        })
        .ok_or_else(|| ValidationError::MalformedDate {
            field: field.to_string(),
            input: s.to_string(),
        })
}

/// Parses a plan month-of-year (`1`-`12`) or a calendar month name (`dec`, `December`).
///
/// Month names are converted to the plan month-of-year for a plan starting at `start`.
pub(crate) fn parse_month_of_year(
    field: &str,
    s: &str,
    start: NaiveDate,
) -> Result<u32, ValidationError> {
    let s = s.trim();
    if let Ok(value) = s.parse::<u32>() {
        if (1..=12).contains(&value) {
            return Ok(value);
        }
        return Err(ValidationError::InvalidMonthOfYear {
            field: field.to_string(),
            value,
        });
    }

    let lower = s.to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|name| lower.is_char_boundary(3) && name.starts_with(&lower[..3]))
        .map(|i| plan_month_of_year(start, i as u32 + 1))
        .ok_or_else(|| ValidationError::MalformedMonth {
            field: field.to_string(),
            input: s.to_string(),
        })
}

/// Parses one of a fixed set of keywords, listing the accepted ones on failure.
pub(crate) fn parse_keyword<T: Copy + std::fmt::Display>(
    field: &str,
    s: &str,
    parse: impl Fn(&str) -> Option<T>,
    all: &[T],
) -> Result<T, ValidationError> {
    parse(s.trim()).ok_or_else(|| ValidationError::UnknownKeyword {
        field: field.to_string(),
        input: s.to_string(),
        expected: all
            .iter()
            .map(|k| k.to_string().to_lowercase())
            .collect::<Vec<_>>()
            .join(", "),
    })
}
