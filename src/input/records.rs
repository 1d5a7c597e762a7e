use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::parse::{
    parse_amount, parse_date, parse_keyword, parse_month, parse_month_of_year, parse_range,
    split_range,
};
use crate::error::ValidationError;
use crate::models::{
    AnnualExpense, AnnualKind, ChildEvent, ChildEventKind, ChildProfile, ChildStatus,
    EducationExpense, EducationFees, EducationStage, HousingLoan, MonthRange, RecurringExpense,
};

fn required<'a>(tokens: &[&'a str], i: usize, field: &str) -> Result<&'a str, ValidationError> {
    tokens
        .get(i)
        .copied()
        .ok_or_else(|| ValidationError::MissingValue {
            field: field.to_string(),
        })
}

fn tokens(args: &str) -> Vec<&str> {
    args.split_whitespace().collect()
}

/// Annual rate in percent; a trailing `%` is allowed.
pub(crate) fn parse_rate(field: &str, s: &str) -> Result<Decimal, ValidationError> {
    parse_amount(field, s.trim().trim_end_matches('%'))
}

/// `<amount> <label...> [@from..to]`
pub(crate) fn parse_expense(args: &str, start: NaiveDate) -> Result<RecurringExpense, ValidationError> {
    let all = tokens(args);
    let (rest, range) = split_range(&all);
    let amount = parse_amount("expense.amount", required(&rest, 0, "expense.amount")?)?;
    let label = rest.get(1..).map(|words| words.join(" ")).unwrap_or_default();
    let active = match range {
        Some(r) => parse_range("expense.months", r, start)?,
        None => MonthRange::whole(),
    };

    let expense = RecurringExpense {
        label,
        amount,
        active,
    };
    expense.validate("expense")?;
    Ok(expense)
}

/// `<kind> <when> <amount> [name...]`. Unknown kinds are filed as `other`.
pub(crate) fn parse_event(args: &str, start: NaiveDate) -> Result<ChildEvent, ValidationError> {
    let all = tokens(args);
    let kind = ChildEventKind::parse(required(&all, 0, "event.kind")?);
    let month = parse_month("event.month", required(&all, 1, "event.month")?, start)?;
    let amount = parse_amount("event.amount", required(&all, 2, "event.amount")?)?;
    let name = match all.get(3..) {
        Some(words) if !words.is_empty() => words.join(" "),
        _ => kind.as_str().to_string(),
    };

    let event = ChildEvent::new(name, kind, month, amount);
    event.validate("event")?;
    Ok(event)
}

/// `<stage> <amount> [@from..to]`
pub(crate) fn parse_education(
    args: &str,
    start: NaiveDate,
) -> Result<EducationExpense, ValidationError> {
    let all = tokens(args);
    let (rest, range) = split_range(&all);
    let stage = parse_keyword(
        "edu.stage",
        required(&rest, 0, "edu.stage")?,
        EducationStage::parse,
        EducationStage::all(),
    )?;
    let amount = parse_amount("edu.amount", required(&rest, 1, "edu.amount")?)?;
    let active = match range {
        Some(r) => parse_range("edu.months", r, start)?,
        None => MonthRange::whole(),
    };

    let expense = EducationExpense::new(stage, amount, active);
    expense.validate("edu")?;
    Ok(expense)
}

/// `<kind> <amount> <month-of-year>`
pub(crate) fn parse_annual(args: &str, start: NaiveDate) -> Result<AnnualExpense, ValidationError> {
    let all = tokens(args);
    let kind = parse_keyword(
        "annual.kind",
        required(&all, 0, "annual.kind")?,
        AnnualKind::parse,
        AnnualKind::all(),
    )?;
    let amount = parse_amount("annual.amount", required(&all, 1, "annual.amount")?)?;
    let month_of_year =
        parse_month_of_year("annual.month", required(&all, 2, "annual.month")?, start)?;

    let expense = AnnualExpense::new(kind, amount, month_of_year);
    expense.validate("annual")?;
    Ok(expense)
}

/// `<status> <birth date> [monthly cost]`. The cost defaults to `default_cost`.
pub(crate) fn parse_child(
    args: &str,
    start: NaiveDate,
    default_cost: Decimal,
) -> Result<ChildProfile, ValidationError> {
    let all = tokens(args);
    let status = parse_keyword(
        "child.status",
        required(&all, 0, "child.status")?,
        ChildStatus::parse,
        ChildStatus::all(),
    )?;
    let birth = parse_date("child.birth", required(&all, 1, "child.birth")?)?;
    let cost = match all.get(2) {
        Some(s) => parse_amount("child.cost", s)?,
        None => default_cost,
    };

    let child = ChildProfile::new(status, birth, cost);
    child.validate(start)?;
    Ok(child)
}

/// `<installment> [principal|-] [rate%] [start month]`. A `-` principal leaves the loan open-ended.
pub(crate) fn parse_loan(args: &str, start: NaiveDate) -> Result<HousingLoan, ValidationError> {
    let all = tokens(args);
    let installment = parse_amount("loan.installment", required(&all, 0, "loan.installment")?)?;
    let mut loan = HousingLoan::new(installment);
    if let Some(principal) = all.get(1).filter(|p| **p != "-") {
        let rate = match all.get(2) {
            Some(r) => parse_rate("loan.rate", r)?,
            None => Decimal::ZERO,
        };
        loan = loan.with_principal(parse_amount("loan.principal", principal)?, rate);
    }
    if let Some(month) = all.get(3) {
        loan = loan.starting(parse_month("loan.start", month, start)?);
    }

    loan.validate()?;
    Ok(loan)
}

/// `<childcare> <preschool> <primary>`
pub(crate) fn parse_fees(args: &str) -> Result<EducationFees, ValidationError> {
    let all = tokens(args);
    let fees = EducationFees {
        childcare: parse_amount("fees.childcare", required(&all, 0, "fees.childcare")?)?,
        preschool: parse_amount("fees.preschool", required(&all, 1, "fees.preschool")?)?,
        primary: parse_amount("fees.primary", required(&all, 2, "fees.primary")?)?,
    };
    fees.validate()?;
    Ok(fees)
}

// ── Formatting back to argument text ─────────────────────────

fn range_suffix(range: MonthRange) -> String {
    if range.is_whole() {
        String::new()
    } else {
        format!(" @{}..{}", range.start, range.end)
    }
}

fn event_keyword(kind: ChildEventKind) -> &'static str {
    match kind {
        ChildEventKind::MaternityCheckup => "checkup",
        ChildEventKind::Delivery => "delivery",
        ChildEventKind::Confinement => "confinement",
        ChildEventKind::Education => "education",
        ChildEventKind::Other => "other",
    }
}

fn stage_keyword(stage: EducationStage) -> &'static str {
    match stage {
        EducationStage::Childcare => "childcare",
        EducationStage::Preschool => "preschool",
        EducationStage::PrimarySchool => "primary",
    }
}

pub(crate) fn expense_args(expense: &RecurringExpense) -> String {
    format!(
        "{} {}{}",
        expense.amount,
        expense.label,
        range_suffix(expense.active)
    )
}

pub(crate) fn event_args(event: &ChildEvent) -> String {
    format!(
        "{} {} {} {}",
        event_keyword(event.kind),
        event.month,
        event.amount,
        event.name
    )
}

pub(crate) fn education_args(expense: &EducationExpense) -> String {
    format!(
        "{} {}{}",
        stage_keyword(expense.stage),
        expense.amount,
        range_suffix(expense.active)
    )
}

pub(crate) fn annual_args(expense: &AnnualExpense) -> String {
    format!(
        "{} {} {}",
        expense.kind.as_str().to_lowercase(),
        expense.amount,
        expense.month_of_year
    )
}

pub(crate) fn child_args(child: &ChildProfile) -> String {
    format!(
        "{} {} {}",
        child.status.as_str(),
        child.birth_date.format("%Y-%m-%d"),
        child.monthly_cost
    )
}

pub(crate) fn loan_args(loan: &HousingLoan) -> String {
    match loan.principal {
        Some(principal) => format!(
            "{} {} {} {}",
            loan.installment, principal, loan.annual_rate, loan.start_month
        ),
        None if loan.start_month > 0 => {
            format!("{} - 0 {}", loan.installment, loan.start_month)
        }
        None => loan.installment.to_string(),
    }
}
