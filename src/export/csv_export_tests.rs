#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::csv_export::write_ledger;
use super::*;
use crate::models::{ChildEvent, ChildEventKind, MonthlyIncome, PlanInput, RecurringExpense};
use crate::projection::project;

fn projection() -> crate::projection::Projection {
    let mut plan = PlanInput::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    plan.income = MonthlyIncome::new(dec!(5000));
    plan.recurring
        .push(RecurringExpense::new("Living".into(), dec!(1000)));
    plan.add_child_event(ChildEvent::new(
        "Delivery".into(),
        ChildEventKind::Delivery,
        0,
        dec!(3000),
    ));
    project(&plan).unwrap()
}

#[test]
fn test_write_ledger_rows() {
    let mut buf = Vec::new();
    let rows = write_ledger(&mut buf, &projection()).unwrap();
    assert_eq!(rows, 72);

    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 73);
    assert_eq!(
        lines[0],
        "month,date,income,housing,living,child,education,one_time,annual,bonus,total_expense,net,cumulative"
    );
    assert_eq!(
        lines[1],
        "0,2025-01,5000.00,0.00,1000.00,0.00,0.00,3000.00,0.00,0.00,4000.00,1000.00,1000.00"
    );
    assert!(lines[72].starts_with("71,2030-12,"));
    assert!(lines[72].ends_with(",285000.00"));
}

#[test]
fn test_export_ledger_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.csv");
    let rows = export_ledger(&path, &projection()).unwrap();
    assert_eq!(rows, 72);

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 72);
    assert_eq!(&records[1][12], "5000.00");
}

#[test]
fn test_export_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("plan.csv");
    let err = export_ledger(&path, &projection()).unwrap_err();
    assert!(err.to_string().contains("Failed to create"));
}

#[test]
fn test_default_export_path_names_start_month() {
    let path = default_export_path(&projection());
    assert!(path.ends_with("familyplan-2025-01.csv"));
}
