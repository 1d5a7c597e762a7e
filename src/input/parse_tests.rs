#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::error::ValidationError;
use crate::models::{ChildStatus, MonthRange};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_amount_plain() {
    assert_eq!(parse_amount("a", "1500").unwrap(), dec!(1500));
    assert_eq!(parse_amount("a", "99.95").unwrap(), dec!(99.95));
}

#[test]
fn test_parse_amount_currency_and_commas() {
    assert_eq!(parse_amount("a", "$1,234.50").unwrap(), dec!(1234.50));
    assert_eq!(parse_amount("a", " 12,000 ").unwrap(), dec!(12000));
}

#[test]
fn test_parse_amount_thousands_suffix() {
    assert_eq!(parse_amount("a", "5k").unwrap(), dec!(5000));
    assert_eq!(parse_amount("a", "2.5K").unwrap(), dec!(2500));
}

#[test]
fn test_parse_amount_rejects_negative() {
    let err = parse_amount("income.amount", "-10").unwrap_err();
    assert!(matches!(err, ValidationError::NegativeAmount { .. }));
    assert_eq!(err.field(), "income.amount");
}

#[test]
fn test_parse_amount_rejects_garbage() {
    assert!(matches!(
        parse_amount("a", "lots"),
        Err(ValidationError::MalformedAmount { .. })
    ));
    assert!(parse_amount("a", "").is_err());
    assert!(parse_amount("a", "k").is_err());
}

// ── parse_month ───────────────────────────────────────────────

#[test]
fn test_parse_month_index() {
    assert_eq!(parse_month("m", "0", start()).unwrap(), 0);
    assert_eq!(parse_month("m", "+12", start()).unwrap(), 12);
    assert_eq!(parse_month("m", "71", start()).unwrap(), 71);
}

#[test]
fn test_parse_month_calendar() {
    assert_eq!(parse_month("m", "2025-03", start()).unwrap(), 0);
    assert_eq!(parse_month("m", "2026-01", start()).unwrap(), 10);
}

#[test]
fn test_parse_month_outside_horizon() {
    let err = parse_month("event.month", "72", start()).unwrap_err();
    assert!(matches!(err, ValidationError::MonthOutOfHorizon { month: 72, .. }));
    let err = parse_month("event.month", "2025-01", start()).unwrap_err();
    assert!(matches!(err, ValidationError::MonthOutOfHorizon { month: -2, .. }));
}

#[test]
fn test_parse_month_malformed() {
    assert!(matches!(
        parse_month("m", "soon", start()),
        Err(ValidationError::MalformedMonth { .. })
    ));
    assert!(parse_month("m", "2025-13", start()).is_err());
}

// ── parse_range ───────────────────────────────────────────────

#[test]
fn test_parse_range_both_bounds() {
    assert_eq!(parse_range("r", "@6..48", start()).unwrap(), MonthRange::new(6, 48));
}

#[test]
fn test_parse_range_open_ends() {
    assert_eq!(parse_range("r", "@12..", start()).unwrap(), MonthRange::new(12, 72));
    assert_eq!(parse_range("r", "@..36", start()).unwrap(), MonthRange::new(0, 36));
    assert_eq!(parse_range("r", "@..", start()).unwrap(), MonthRange::whole());
}

#[test]
fn test_parse_range_calendar_bounds() {
    assert_eq!(
        parse_range("r", "@2026-03..2027-03", start()).unwrap(),
        MonthRange::new(12, 24)
    );
}

#[test]
fn test_parse_range_invalid() {
    assert!(matches!(
        parse_range("r", "@20..10", start()),
        Err(ValidationError::InvalidRange { .. })
    ));
    assert!(parse_range("r", "@0..80", start()).is_err());
    assert!(parse_range("r", "6..48", start()).is_err());
}

#[test]
fn test_split_range() {
    let (rest, range) = split_range(&["Piano", "lessons", "@0..12"]);
    assert_eq!(rest, vec!["Piano", "lessons"]);
    assert_eq!(range, Some("@0..12"));

    let (rest, range) = split_range(&["Rent"]);
    assert_eq!(rest, vec!["Rent"]);
    assert_eq!(range, None);
}

// ── parse_date ────────────────────────────────────────────────

#[test]
fn test_parse_date() {
    assert_eq!(
        parse_date("d", "2025-06-15").unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    );
    assert_eq!(
        parse_date("d", "2025-06").unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    );
}

#[test]
fn test_parse_date_malformed() {
    let err = parse_date("child.birth_date", "2025-02-30").unwrap_err();
    assert!(matches!(err, ValidationError::MalformedDate { .. }));
    assert_eq!(err.field(), "child.birth_date");
    assert!(parse_date("d", "15/06/2025").is_err());
}

// ── parse_month_of_year ───────────────────────────────────────

#[test]
fn test_month_of_year_number_is_plan_month() {
    assert_eq!(parse_month_of_year("m", "1", start()).unwrap(), 1);
    assert_eq!(parse_month_of_year("m", "12", start()).unwrap(), 12);
    assert!(matches!(
        parse_month_of_year("m", "13", start()),
        Err(ValidationError::InvalidMonthOfYear { value: 13, .. })
    ));
}

#[test]
fn test_month_of_year_name_is_calendar_month() {
    // March start: December is the tenth plan month
    assert_eq!(parse_month_of_year("m", "dec", start()).unwrap(), 10);
    assert_eq!(parse_month_of_year("m", "December", start()).unwrap(), 10);
    assert_eq!(parse_month_of_year("m", "Mar", start()).unwrap(), 1);
    assert!(parse_month_of_year("m", "de", start()).is_err());
}

// ── parse_keyword ─────────────────────────────────────────────

#[test]
fn test_parse_keyword() {
    let status = parse_keyword("child.status", "due", ChildStatus::parse, ChildStatus::all());
    assert_eq!(status.unwrap(), ChildStatus::Due);

    let err = parse_keyword("child.status", "twins", ChildStatus::parse, ChildStatus::all())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "child.status: unknown value 'twins' (expected one of: born, due, planned)"
    );
}
