#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::{plan_from_args, shellexpand};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_defaults_without_flags() {
    let (plan, positional) = plan_from_args(&[], today()).unwrap();
    assert_eq!(plan.start, today());
    assert_eq!(plan.income.amount, dec!(5000));
    assert!(plan.loan.is_some());
    assert!(plan.child.is_some());
    assert!(positional.is_empty());
}

#[test]
fn test_flags_override_sample() {
    let (plan, positional) = plan_from_args(
        &args(&[
            "--start", "2026-03", "--balance", "-1,500", "--income", "6k", "--expenses",
            "2500", "--mortgage", "none", "--no-child", "out.csv",
        ]),
        today(),
    )
    .unwrap();

    assert_eq!(plan.start, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    assert_eq!(plan.starting_balance, dec!(-1500));
    assert_eq!(plan.income.amount, dec!(6000));
    assert_eq!(plan.recurring.len(), 1);
    assert_eq!(plan.recurring[0].amount, dec!(2500));
    assert!(plan.loan.is_none());
    assert!(plan.child.is_none());
    assert_eq!(positional, vec!["out.csv".to_string()]);
}

#[test]
fn test_mortgage_with_principal() {
    let (plan, _) =
        plan_from_args(&args(&["--mortgage", "1800 350000 3.5%"]), today()).unwrap();
    let loan = plan.loan.unwrap();
    assert_eq!(loan.installment, dec!(1800));
    assert_eq!(loan.principal, Some(dec!(350000)));
    assert_eq!(loan.annual_rate, dec!(3.5));
}

#[test]
fn test_invalid_flag_value_is_rejected() {
    let err = plan_from_args(&args(&["--income", "-5"]), today()).unwrap_err();
    assert!(err.to_string().contains("income.amount"));
}

#[test]
fn test_unknown_option_is_rejected() {
    let err = plan_from_args(&args(&["--verbose"]), today()).unwrap_err();
    assert_eq!(err.to_string(), "Unknown option: --verbose");
}

#[test]
fn test_missing_flag_value() {
    let err = plan_from_args(&args(&["--income"]), today()).unwrap_err();
    assert_eq!(err.to_string(), "Missing value for --income");
}

#[test]
fn test_shellexpand() {
    assert_eq!(shellexpand("/tmp/plan.csv"), "/tmp/plan.csv");
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    assert_eq!(shellexpand("~/plan.csv"), format!("{home}/plan.csv"));
}
