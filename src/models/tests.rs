#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::error::ValidationError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn start() -> NaiveDate {
    date(2025, 3, 1)
}

// ── MonthRange ────────────────────────────────────────────────

#[test]
fn test_range_whole_covers_horizon() {
    let range = MonthRange::whole();
    assert!(range.contains(0));
    assert!(range.contains(71));
    assert!(!range.contains(72));
    assert_eq!(range.len(), 72);
    assert_eq!(range.to_string(), "all");
}

#[test]
fn test_range_is_half_open() {
    let range = MonthRange::new(6, 12);
    assert!(!range.contains(5));
    assert!(range.contains(6));
    assert!(range.contains(11));
    assert!(!range.contains(12));
    assert_eq!(range.to_string(), "6..12");
}

#[test]
fn test_range_clipped() {
    assert_eq!(MonthRange::clipped(-10, 5), Some(MonthRange::new(0, 5)));
    assert_eq!(MonthRange::clipped(60, 200), Some(MonthRange::new(60, 72)));
    assert_eq!(MonthRange::clipped(-10, 0), None);
    assert_eq!(MonthRange::clipped(72, 90), None);
}

#[test]
fn test_range_validate() {
    assert!(MonthRange::new(0, 72).validate("r").is_ok());
    assert!(matches!(
        MonthRange::new(10, 10).validate("r"),
        Err(ValidationError::InvalidRange { .. })
    ));
    assert!(matches!(
        MonthRange::new(0, 73).validate("r"),
        Err(ValidationError::InvalidRange { .. })
    ));
}

// ── Calendar helpers ──────────────────────────────────────────

#[test]
fn test_months_between() {
    assert_eq!(months_between(date(2025, 3, 1), date(2025, 3, 31)), 0);
    assert_eq!(months_between(date(2025, 3, 1), date(2026, 2, 1)), 11);
    assert_eq!(months_between(date(2025, 3, 1), date(2024, 12, 1)), -3);
}

#[test]
fn test_month_date() {
    assert_eq!(month_date(start(), 0), Some(date(2025, 3, 1)));
    assert_eq!(month_date(start(), 10), Some(date(2026, 1, 1)));
    assert_eq!(month_date(date(2025, 3, 17), 71), Some(date(2031, 2, 1)));
}

#[test]
fn test_checked_month() {
    assert_eq!(checked_month("m", 0).unwrap(), 0);
    assert_eq!(checked_month("m", 71).unwrap(), 71);
    let err = checked_month("child_events[0].month", 72).unwrap_err();
    assert_eq!(err.field(), "child_events[0].month");
    assert!(checked_month("m", -1).is_err());
}

#[test]
fn test_plan_month_of_year_roundtrip() {
    // March start: March is plan month 1, February is plan month 12
    assert_eq!(plan_month_of_year(start(), 3), 1);
    assert_eq!(plan_month_of_year(start(), 12), 10);
    assert_eq!(plan_month_of_year(start(), 2), 12);
    for cal in 1..=12 {
        let plan = plan_month_of_year(start(), cal);
        assert_eq!(calendar_month_of(start(), plan), cal);
    }
}

#[test]
fn test_set_start_keeps_annual_calendar_month() {
    let mut plan = PlanInput::sample(start());
    let month_of = |plan: &PlanInput, kind: AnnualKind| {
        plan.annual.iter().find(|a| a.kind == kind).unwrap().month_of_year
    };
    assert_eq!(calendar_month_of(plan.start, month_of(&plan, AnnualKind::Bonus)), 12);

    plan.set_start(NaiveDate::from_ymd_opt(2025, 8, 20).unwrap());

    assert_eq!(plan.start, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
    // August start: December is the fifth plan month, March the eighth
    assert_eq!(month_of(&plan, AnnualKind::Bonus), 5);
    assert_eq!(month_of(&plan, AnnualKind::Insurance), 8);
    assert_eq!(month_of(&plan, AnnualKind::Tax), 9);
}

// ── Records ───────────────────────────────────────────────────

#[test]
fn test_recurring_expense_bounds() {
    let mut expense = RecurringExpense::new("Rent".into(), dec!(800));
    expense.active = MonthRange::bounded(Some(12), None);
    assert!(!expense.is_active(11));
    assert!(expense.is_active(12));
    assert!(expense.is_active(71));
}

#[test]
fn test_recurring_expense_rejects_negative() {
    let expense = RecurringExpense::new("Rent".into(), dec!(-1));
    let err = expense.validate("recurring[3]").unwrap_err();
    assert_eq!(err.field(), "recurring[3].amount");
}

#[test]
fn test_recurring_expense_rejects_blank_label() {
    let expense = RecurringExpense::new("  ".into(), dec!(10));
    assert!(matches!(
        expense.validate("recurring[0]"),
        Err(ValidationError::EmptyLabel { .. })
    ));
}

#[test]
fn test_child_event_out_of_horizon() {
    let event = ChildEvent::new("Delivery".into(), ChildEventKind::Delivery, 72, dec!(3000));
    let err = event.validate("child_events[0]").unwrap_err();
    assert_eq!(err.field(), "child_events[0].month");
}

#[test]
fn test_child_event_kind_parse() {
    assert_eq!(ChildEventKind::parse("checkup"), ChildEventKind::MaternityCheckup);
    assert_eq!(ChildEventKind::parse("DELIVERY"), ChildEventKind::Delivery);
    assert_eq!(ChildEventKind::parse("confinement"), ChildEventKind::Confinement);
    assert_eq!(ChildEventKind::parse("stroller"), ChildEventKind::Other);
    assert_eq!(ChildEventKind::all().len(), 5);
}

#[test]
fn test_annual_expense_applies_once_per_year() {
    let insurance = AnnualExpense::new(AnnualKind::Insurance, dec!(1200), 1);
    let months: Vec<u32> = (0..72).filter(|m| insurance.applies(*m)).collect();
    assert_eq!(months, vec![0, 12, 24, 36, 48, 60]);
}

#[test]
fn test_annual_expense_month_of_year_bounds() {
    assert!(AnnualExpense::new(AnnualKind::Tax, dec!(1), 12).validate("a").is_ok());
    assert!(matches!(
        AnnualExpense::new(AnnualKind::Tax, dec!(1), 0).validate("annual[0]"),
        Err(ValidationError::InvalidMonthOfYear { .. })
    ));
    assert!(AnnualExpense::new(AnnualKind::Tax, dec!(1), 13).validate("a").is_err());
}

// ── HousingLoan ───────────────────────────────────────────────

#[test]
fn test_open_ended_loan_runs_to_horizon() {
    let loan = HousingLoan::new(dec!(1500)).starting(6);
    let schedule = loan.schedule(72).unwrap();
    assert_eq!(schedule.len(), 72);
    assert_eq!(schedule[5].payment, Decimal::ZERO);
    assert!(schedule[6..].iter().all(|p| p.payment == dec!(1500)));
    assert_eq!(loan.payoff_month(72), None);
}

#[test]
fn test_zero_rate_loan_stops_when_repaid() {
    let loan = HousingLoan::new(dec!(1000))
        .with_principal(dec!(2500), Decimal::ZERO)
        .starting(2);
    let payments: Vec<Decimal> = loan.schedule(72).unwrap().iter().map(|p| p.payment).collect();
    assert_eq!(payments[0], Decimal::ZERO);
    assert_eq!(payments[2], dec!(1000));
    assert_eq!(payments[3], dec!(1000));
    assert_eq!(payments[4], dec!(500));
    assert!(payments[5..].iter().all(|p| *p == Decimal::ZERO));
    assert_eq!(loan.payoff_month(72), Some(4));
}

#[test]
fn test_interest_bearing_loan() {
    // 12% a year is 1% a month
    let loan = HousingLoan::new(dec!(600)).with_principal(dec!(1000), dec!(12));
    let schedule = loan.schedule(72).unwrap();
    assert_eq!(schedule[0].interest, dec!(10.00));
    assert_eq!(schedule[0].payment, dec!(600));
    assert_eq!(schedule[0].balance, Some(dec!(410.00)));
    assert_eq!(schedule[1].interest, dec!(4.10));
    assert_eq!(schedule[1].payment, dec!(414.10));
    assert_eq!(schedule[1].balance, Some(Decimal::ZERO));
    assert_eq!(schedule[2].payment, Decimal::ZERO);
}

#[test]
fn test_loan_that_never_amortizes_is_rejected() {
    let loan = HousingLoan::new(dec!(100)).with_principal(dec!(500000), dec!(3));
    let err = loan.validate().unwrap_err();
    assert!(matches!(err, ValidationError::LoanNeverAmortizes { .. }));
    assert_eq!(err.field(), "loan.installment");
}

#[test]
fn test_loan_start_outside_horizon() {
    let loan = HousingLoan::new(dec!(100)).starting(80);
    assert_eq!(loan.validate().unwrap_err().field(), "loan.start");
}

// ── ChildProfile & EducationFees ──────────────────────────────

fn fees() -> EducationFees {
    EducationFees {
        childcare: dec!(1000),
        preschool: dec!(1200),
        primary: dec!(300),
    }
}

#[test]
fn test_child_age() {
    let child = ChildProfile::new(ChildStatus::Due, date(2025, 6, 15), dec!(500));
    assert_eq!(child.age_at_start(start()), -3);
    assert_eq!(child.age_at(start(), 3), 0);
    assert_eq!(child.monthly_cost_at(start(), 2), Decimal::ZERO);
    assert_eq!(child.monthly_cost_at(start(), 3), dec!(500));
}

#[test]
fn test_education_derived_for_newborn() {
    let child = ChildProfile::new(ChildStatus::Born, start(), dec!(0));
    let derived = fees().derive(&child, start());
    assert_eq!(derived.len(), 2);
    assert_eq!(derived[0].stage, EducationStage::Childcare);
    assert_eq!(derived[0].active, MonthRange::new(6, 48));
    assert_eq!(derived[1].stage, EducationStage::Preschool);
    assert_eq!(derived[1].active, MonthRange::new(48, 72));
}

#[test]
fn test_education_derived_for_older_child() {
    // Five years old at the start: preschool for two more years, then primary school
    let child = ChildProfile::new(ChildStatus::Born, date(2020, 3, 1), dec!(0));
    let derived = fees().derive(&child, start());
    assert_eq!(derived.len(), 2);
    assert_eq!(derived[0].stage, EducationStage::Preschool);
    assert_eq!(derived[0].active, MonthRange::new(0, 24));
    assert_eq!(derived[1].stage, EducationStage::PrimarySchool);
    assert_eq!(derived[1].active, MonthRange::new(24, 72));
}

#[test]
fn test_education_skips_zero_fee() {
    let mut f = fees();
    f.childcare = Decimal::ZERO;
    let child = ChildProfile::new(ChildStatus::Born, start(), dec!(0));
    let derived = f.derive(&child, start());
    assert!(derived.iter().all(|e| e.stage != EducationStage::Childcare));
}

#[test]
fn test_child_status_must_match_birth_date() {
    let child = ChildProfile::new(ChildStatus::Born, date(2025, 9, 1), dec!(500));
    let err = child.validate(start()).unwrap_err();
    assert!(matches!(err, ValidationError::ChildStatusMismatch { .. }));

    let child = ChildProfile::new(ChildStatus::Due, date(2024, 9, 1), dec!(500));
    assert!(child.validate(start()).is_err());

    let child = ChildProfile::new(ChildStatus::Planned, start(), dec!(500));
    assert!(child.validate(start()).is_ok());
}

#[test]
fn test_child_status_parse() {
    assert_eq!(ChildStatus::parse("born"), Some(ChildStatus::Born));
    assert_eq!(ChildStatus::parse("Due"), Some(ChildStatus::Due));
    assert_eq!(ChildStatus::parse("planned"), Some(ChildStatus::Planned));
    assert_eq!(ChildStatus::parse("adopted"), None);
}

// ── PlanInput ─────────────────────────────────────────────────

#[test]
fn test_sample_plan_is_valid() {
    let plan = PlanInput::sample(date(2025, 3, 17));
    assert_eq!(plan.start, start());
    assert!(plan.validate().is_ok());
    assert_eq!(plan.income.amount, dec!(5000));
    // December bonus lands on plan month 10 for a March start
    let bonus = plan.annual.iter().find(|a| a.kind == AnnualKind::Bonus).unwrap();
    assert_eq!(bonus.month_of_year, 10);
}

#[test]
fn test_plan_validation_reports_first_bad_field() {
    let mut plan = PlanInput::new(start());
    plan.recurring.push(RecurringExpense::new("Food".into(), dec!(100)));
    plan.recurring.push(RecurringExpense::new("Rent".into(), dec!(-5)));
    plan.child_events.push(ChildEvent::new(
        "Late".into(),
        ChildEventKind::Other,
        99,
        dec!(1),
    ));
    let err = plan.validate().unwrap_err();
    assert_eq!(err.field(), "recurring[1].amount");
}

#[test]
fn test_plan_education_includes_derived() {
    let mut plan = PlanInput::new(start());
    plan.education.push(EducationExpense::new(
        EducationStage::PrimarySchool,
        dec!(50),
        MonthRange::new(0, 12),
    ));
    plan.child = Some(ChildProfile::new(ChildStatus::Born, start(), dec!(0)));
    plan.fees = fees();
    let all = plan.education_expenses();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].amount, dec!(50));
}

#[test]
fn test_add_child_event_keeps_order() {
    let mut plan = PlanInput::new(start());
    plan.add_child_event(ChildEvent::new("b".into(), ChildEventKind::Delivery, 5, dec!(1)));
    plan.add_child_event(ChildEvent::new("a".into(), ChildEventKind::MaternityCheckup, 2, dec!(1)));
    let months: Vec<u32> = plan.child_events.iter().map(|e| e.month).collect();
    assert_eq!(months, vec![2, 5]);
}

#[test]
fn test_remove_record() {
    let mut plan = PlanInput::sample(start());
    let before = plan.annual.len();
    assert!(plan.remove(RecordRef::Annual(0)));
    assert_eq!(plan.annual.len(), before - 1);
    assert!(!plan.remove(RecordRef::Recurring(10)));
}
