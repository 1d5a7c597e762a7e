#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::error::ValidationError;
use crate::models::{AnnualKind, ChildEventKind, ChildStatus, EducationStage, MonthRange};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

// ── Expenses and events ───────────────────────────────────────

#[test]
fn test_parse_expense_whole_horizon() {
    let expense = parse_expense("2,000 Living expenses", start()).unwrap();
    assert_eq!(expense.amount, dec!(2000));
    assert_eq!(expense.label, "Living expenses");
    assert!(expense.active.is_whole());
}

#[test]
fn test_parse_expense_with_range() {
    let expense = parse_expense("300 Car lease @2025-06..24", start()).unwrap();
    assert_eq!(expense.label, "Car lease");
    assert_eq!(expense.active, MonthRange::new(3, 24));
}

#[test]
fn test_parse_expense_needs_label() {
    let err = parse_expense("300", start()).unwrap_err();
    assert_eq!(err.field(), "expense.label");
}

#[test]
fn test_parse_expense_missing_amount() {
    let err = parse_expense("", start()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingValue {
            field: "expense.amount".into()
        }
    );
}

#[test]
fn test_parse_event_defaults_name_to_kind() {
    let event = parse_event("delivery 2025-06 8k", start()).unwrap();
    assert_eq!(event.kind, ChildEventKind::Delivery);
    assert_eq!(event.month, 3);
    assert_eq!(event.amount, dec!(8000));
    assert_eq!(event.name, "Delivery");
}

#[test]
fn test_parse_event_unknown_kind_is_other() {
    let event = parse_event("stroller 0 450 New stroller", start()).unwrap();
    assert_eq!(event.kind, ChildEventKind::Other);
    assert_eq!(event.name, "New stroller");
}

#[test]
fn test_parse_event_outside_horizon() {
    let err = parse_event("checkup 72 100", start()).unwrap_err();
    assert!(matches!(err, ValidationError::MonthOutOfHorizon { month: 72, .. }));
}

// ── Education, annual, child ──────────────────────────────────

#[test]
fn test_parse_education() {
    let edu = parse_education("preschool 1200 @12..36", start()).unwrap();
    assert_eq!(edu.stage, EducationStage::Preschool);
    assert_eq!(edu.active, MonthRange::new(12, 36));
}

#[test]
fn test_parse_education_unknown_stage() {
    let err = parse_education("college 5000", start()).unwrap_err();
    assert_eq!(err.field(), "edu.stage");
    assert!(err.to_string().contains("childcare, preschool, primary school"));
}

#[test]
fn test_parse_annual_with_month_name() {
    let annual = parse_annual("tax 3000 apr", start()).unwrap();
    assert_eq!(annual.kind, AnnualKind::Tax);
    assert_eq!(annual.month_of_year, 2);
}

#[test]
fn test_parse_annual_bad_month() {
    let err = parse_annual("bonus 10000 13", start()).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidMonthOfYear { value: 13, .. }));
}

#[test]
fn test_parse_child_uses_default_cost() {
    let child = parse_child("due 2025-07-14", start(), dec!(500)).unwrap();
    assert_eq!(child.status, ChildStatus::Due);
    assert_eq!(child.monthly_cost, dec!(500));

    let child = parse_child("born 2024-11 650", start(), dec!(500)).unwrap();
    assert_eq!(child.monthly_cost, dec!(650));
}

#[test]
fn test_parse_child_status_mismatch() {
    let err = parse_child("born 2026-01", start(), Decimal::ZERO).unwrap_err();
    assert!(matches!(err, ValidationError::ChildStatusMismatch { .. }));
}

// ── Loan and fees ─────────────────────────────────────────────

#[test]
fn test_parse_loan_open_ended() {
    let loan = parse_loan("1500", start()).unwrap();
    assert_eq!(loan.installment, dec!(1500));
    assert_eq!(loan.principal, None);
    assert_eq!(loan.start_month, 0);
}

#[test]
fn test_parse_loan_amortizing() {
    let loan = parse_loan("2000 300k 3.5% 6", start()).unwrap();
    assert_eq!(loan.principal, Some(dec!(300000)));
    assert_eq!(loan.annual_rate, dec!(3.5));
    assert_eq!(loan.start_month, 6);
}

#[test]
fn test_parse_loan_open_ended_with_start() {
    let loan = parse_loan("1500 - 0 2026-03", start()).unwrap();
    assert_eq!(loan.principal, None);
    assert_eq!(loan.start_month, 12);
}

#[test]
fn test_parse_loan_never_amortizes() {
    let err = parse_loan("500 300000 6", start()).unwrap_err();
    assert!(matches!(err, ValidationError::LoanNeverAmortizes { .. }));
}

#[test]
fn test_parse_fees() {
    let fees = parse_fees("1000 1.2k 300").unwrap();
    assert_eq!(fees.preschool, dec!(1200));
    assert_eq!(
        parse_fees("1000 1200").unwrap_err().field(),
        "fees.primary"
    );
}

// ── Argument text ─────────────────────────────────────────────

#[test]
fn test_args_text_parses_back() {
    let expense = parse_expense("300 Car lease @3..24", start()).unwrap();
    assert_eq!(expense_args(&expense), "300 Car lease @3..24");
    assert_eq!(parse_expense(&expense_args(&expense), start()).unwrap(), expense);

    let event = parse_event("checkup 4 120 Scan", start()).unwrap();
    assert_eq!(event_args(&event), "checkup 4 120 Scan");

    let loan = parse_loan("1500 - 0 12", start()).unwrap();
    assert_eq!(loan_args(&loan), "1500 - 0 12");
    assert_eq!(parse_loan(&loan_args(&loan), start()).unwrap(), loan);

    let child = parse_child("due 2025-07-14 500", start(), Decimal::ZERO).unwrap();
    assert_eq!(child_args(&child), "due 2025-07-14 500");
}
