use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::input::{
    annual_args, child_args, education_args, event_args, expense_args, parse_amount,
    parse_annual, parse_child, parse_date, parse_education, parse_event, parse_expense,
    parse_keyword, parse_month, parse_rate, parse_signed_amount,
};
use crate::models::{ChildStatus, EducationStage, HousingLoan, PlanInput, RecordRef};
use crate::projection::HORIZON_MONTHS;
use crate::ui::util::format_amount;

/// One editable line of the Plan screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlanRow {
    Start,
    Balance,
    Income,
    LoanInstallment,
    LoanPrincipal,
    LoanRate,
    LoanStart,
    Child,
    ChildBirth,
    ChildCost,
    Fee(EducationStage),
    Record(RecordRef),
}

/// Rows in display order. Loan and child detail rows only exist once there is a loan or child.
pub(crate) fn rows(plan: &PlanInput) -> Vec<PlanRow> {
    let mut rows = vec![PlanRow::Start, PlanRow::Balance, PlanRow::Income, PlanRow::LoanInstallment];
    if let Some(loan) = &plan.loan {
        if loan.principal.is_some() {
            rows.extend([PlanRow::LoanPrincipal, PlanRow::LoanRate]);
        }
        rows.push(PlanRow::LoanStart);
    }
    rows.push(PlanRow::Child);
    if plan.child.is_some() {
        rows.extend([PlanRow::ChildBirth, PlanRow::ChildCost]);
    }
    rows.extend(EducationStage::all().iter().map(|s| PlanRow::Fee(*s)));
    rows.extend((0..plan.recurring.len()).map(|i| PlanRow::Record(RecordRef::Recurring(i))));
    rows.extend((0..plan.child_events.len()).map(|i| PlanRow::Record(RecordRef::ChildEvent(i))));
    rows.extend((0..plan.education.len()).map(|i| PlanRow::Record(RecordRef::Education(i))));
    rows.extend((0..plan.annual.len()).map(|i| PlanRow::Record(RecordRef::Annual(i))));
    rows
}

fn month_label(plan: &PlanInput, month: u32) -> String {
    plan.month_date(month)
        .map_or_else(|| format!("m{month}"), |d| format!("m{month} ({})", d.format("%Y-%m")))
}

impl PlanRow {
    pub(crate) fn section(&self) -> &'static str {
        match self {
            Self::Start | Self::Balance | Self::Income => "Household",
            Self::LoanInstallment | Self::LoanPrincipal | Self::LoanRate | Self::LoanStart => {
                "Housing loan"
            }
            Self::Child | Self::ChildBirth | Self::ChildCost => "Child",
            Self::Fee(_) => "Education fees",
            Self::Record(RecordRef::Recurring(_)) => "Recurring expenses",
            Self::Record(RecordRef::ChildEvent(_)) => "One-time events",
            Self::Record(RecordRef::Education(_)) => "Education",
            Self::Record(RecordRef::Annual(_)) => "Annual items",
        }
    }

    pub(crate) fn label(&self, plan: &PlanInput) -> String {
        match self {
            Self::Start => "Start month".into(),
            Self::Balance => "Starting balance".into(),
            Self::Income => "Monthly income".into(),
            Self::LoanInstallment => "Installment".into(),
            Self::LoanPrincipal => "Principal".into(),
            Self::LoanRate => "Annual rate".into(),
            Self::LoanStart => "First payment".into(),
            Self::Child => "Status".into(),
            Self::ChildBirth => "Birth date".into(),
            Self::ChildCost => "Monthly cost".into(),
            Self::Fee(stage) => stage.as_str().into(),
            Self::Record(record) => match *record {
                RecordRef::Recurring(i) => plan
                    .recurring
                    .get(i)
                    .map_or_else(String::new, |e| e.label.clone()),
                RecordRef::ChildEvent(i) => plan
                    .child_events
                    .get(i)
                    .map_or_else(String::new, |e| e.name.clone()),
                RecordRef::Education(i) => plan
                    .education
                    .get(i)
                    .map_or_else(String::new, |e| e.stage.to_string()),
                RecordRef::Annual(i) => plan
                    .annual
                    .get(i)
                    .map_or_else(String::new, |e| e.kind.to_string()),
            },
        }
    }

    /// Current value as shown on the Plan screen.
    pub(crate) fn value(&self, plan: &PlanInput) -> String {
        let loan = plan.loan.as_ref();
        let child = plan.child.as_ref();
        match self {
            Self::Start => plan.start.format("%Y-%m").to_string(),
            Self::Balance => format_amount(plan.starting_balance),
            Self::Income => format_amount(plan.income.amount),
            Self::LoanInstallment => loan.map_or_else(|| "none".into(), |l| format_amount(l.installment)),
            Self::LoanPrincipal => loan
                .and_then(|l| l.principal)
                .map_or_else(|| "open-ended".into(), format_amount),
            Self::LoanRate => loan.map_or_else(String::new, |l| format!("{}%", l.annual_rate)),
            Self::LoanStart => loan.map_or_else(String::new, |l| month_label(plan, l.start_month)),
            Self::Child => child.map_or_else(|| "none".into(), |c| c.status.to_string()),
            Self::ChildBirth => child.map_or_else(String::new, |c| {
                format!("{} (age {} mo at start)", c.birth_date, c.age_at_start(plan.start))
            }),
            Self::ChildCost => child.map_or_else(String::new, |c| format_amount(c.monthly_cost)),
            Self::Fee(stage) => format_amount(plan.fees.fee(*stage)),
            Self::Record(record) => match *record {
                RecordRef::Recurring(i) => plan.recurring.get(i).map_or_else(String::new, |e| {
                    format!("{} /mo, months {}", format_amount(e.amount), e.active)
                }),
                RecordRef::ChildEvent(i) => plan.child_events.get(i).map_or_else(String::new, |e| {
                    format!("{} in {}", format_amount(e.amount), month_label(plan, e.month))
                }),
                RecordRef::Education(i) => plan.education.get(i).map_or_else(String::new, |e| {
                    format!("{} /mo, months {}", format_amount(e.amount), e.active)
                }),
                RecordRef::Annual(i) => plan.annual.get(i).map_or_else(String::new, |e| {
                    format!("{} in plan month {}", format_amount(e.amount), e.month_of_year)
                }),
            },
        }
    }

    /// Text the inline editor opens with.
    pub(crate) fn edit_text(&self, plan: &PlanInput) -> String {
        let loan = plan.loan.as_ref();
        let child = plan.child.as_ref();
        match self {
            Self::Start => plan.start.format("%Y-%m").to_string(),
            Self::Balance => plan.starting_balance.to_string(),
            Self::Income => plan.income.amount.to_string(),
            Self::LoanInstallment => loan.map_or_else(String::new, |l| l.installment.to_string()),
            Self::LoanPrincipal => loan
                .and_then(|l| l.principal)
                .map_or_else(String::new, |p| p.to_string()),
            Self::LoanRate => loan.map_or_else(String::new, |l| l.annual_rate.to_string()),
            Self::LoanStart => loan.map_or_else(String::new, |l| l.start_month.to_string()),
            Self::Child => child.map_or_else(String::new, child_args),
            Self::ChildBirth => child.map_or_else(String::new, |c| c.birth_date.to_string()),
            Self::ChildCost => child.map_or_else(String::new, |c| c.monthly_cost.to_string()),
            Self::Fee(stage) => plan.fees.fee(*stage).to_string(),
            Self::Record(record) => match *record {
                RecordRef::Recurring(i) => plan.recurring.get(i).map_or_else(String::new, expense_args),
                RecordRef::ChildEvent(i) => plan.child_events.get(i).map_or_else(String::new, event_args),
                RecordRef::Education(i) => plan.education.get(i).map_or_else(String::new, education_args),
                RecordRef::Annual(i) => plan.annual.get(i).map_or_else(String::new, annual_args),
            },
        }
    }

    /// Writes edited text back into `plan`. The caller validates the whole plan afterwards.
    pub(crate) fn apply_text(&self, plan: &mut PlanInput, text: &str) -> Result<(), ValidationError> {
        let start = plan.start;
        match self {
            Self::Start => plan.set_start(parse_date("start", text)?),
            Self::Balance => plan.starting_balance = parse_signed_amount("balance", text)?,
            Self::Income => plan.income.amount = parse_amount("income.amount", text)?,
            Self::LoanInstallment => {
                if text.trim().is_empty() || text.trim() == "none" {
                    plan.loan = None;
                } else {
                    let installment = parse_amount("loan.installment", text)?;
                    match plan.loan.as_mut() {
                        Some(loan) => loan.installment = installment,
                        None => plan.loan = Some(HousingLoan::new(installment)),
                    }
                }
            }
            Self::LoanPrincipal => {
                if let Some(loan) = plan.loan.as_mut() {
                    loan.principal = if text.trim().is_empty() {
                        None
                    } else {
                        Some(parse_amount("loan.principal", text)?)
                    };
                }
            }
            Self::LoanRate => {
                if let Some(loan) = plan.loan.as_mut() {
                    loan.annual_rate = parse_rate("loan.rate", text)?;
                }
            }
            Self::LoanStart => {
                if let Some(loan) = plan.loan.as_mut() {
                    loan.start_month = parse_month("loan.start", text, start)?;
                }
            }
            Self::Child => {
                if text.trim().is_empty() || text.trim() == "none" {
                    plan.child = None;
                } else if let Some(child) = plan.child.as_mut().filter(|_| !text.contains(' ')) {
                    child.status = parse_keyword(
                        "child.status",
                        text,
                        ChildStatus::parse,
                        ChildStatus::all(),
                    )?;
                } else {
                    let cost = plan.child.as_ref().map_or(Decimal::ZERO, |c| c.monthly_cost);
                    plan.child = Some(parse_child(text, start, cost)?);
                }
            }
            Self::ChildBirth => {
                if let Some(child) = plan.child.as_mut() {
                    child.birth_date = parse_date("child.birth", text)?;
                }
            }
            Self::ChildCost => {
                if let Some(child) = plan.child.as_mut() {
                    child.monthly_cost = parse_amount("child.cost", text)?;
                }
            }
            Self::Fee(stage) => {
                let fee = parse_amount(&format!("fees.{}", stage_field(*stage)), text)?;
                set_fee(plan, *stage, fee);
            }
            Self::Record(record) => match *record {
                RecordRef::Recurring(i) => {
                    if let Some(slot) = plan.recurring.get_mut(i) {
                        *slot = parse_expense(text, start)?;
                    }
                }
                RecordRef::ChildEvent(i) => {
                    let event = parse_event(text, start)?;
                    if plan.remove(RecordRef::ChildEvent(i)) {
                        plan.add_child_event(event);
                    }
                }
                RecordRef::Education(i) => {
                    if let Some(slot) = plan.education.get_mut(i) {
                        *slot = parse_education(text, start)?;
                    }
                }
                RecordRef::Annual(i) => {
                    if let Some(slot) = plan.annual.get_mut(i) {
                        *slot = parse_annual(text, start)?;
                    }
                }
            },
        }
        Ok(())
    }

    /// Steps a numeric row by `steps` increments. Returns `false` for rows with no numeric value.
    ///
    /// Amounts stop at zero; month fields stop at the horizon edges. A step that would overflow
    /// is rejected and leaves the plan untouched.
    pub(crate) fn adjust(
        &self,
        plan: &mut PlanInput,
        steps: i32,
    ) -> Result<bool, ValidationError> {
        let bump =
            |field: &str, value: &mut Decimal, step: Decimal| -> Result<bool, ValidationError> {
                *value = stepped(field, *value, steps, step)?.max(Decimal::ZERO);
                Ok(true)
            };
        let hundred = Decimal::ONE_HUNDRED;
        match self {
            Self::Start => {
                let shifted = if steps >= 0 {
                    plan.start.checked_add_months(chrono::Months::new(steps.unsigned_abs()))
                } else {
                    plan.start.checked_sub_months(chrono::Months::new(steps.unsigned_abs()))
                };
                if let Some(date) = shifted {
                    plan.set_start(date);
                }
                Ok(true)
            }
            Self::Balance => {
                plan.starting_balance =
                    stepped("balance", plan.starting_balance, steps, Decimal::from(1000))?;
                Ok(true)
            }
            Self::Income => bump("income.amount", &mut plan.income.amount, hundred),
            Self::LoanInstallment => match plan.loan.as_mut() {
                Some(loan) => bump("loan.installment", &mut loan.installment, hundred),
                None => Ok(false),
            },
            Self::LoanPrincipal => match plan.loan.as_mut().and_then(|l| l.principal.as_mut()) {
                Some(principal) => bump("loan.principal", principal, Decimal::from(10_000)),
                None => Ok(false),
            },
            Self::LoanRate => match plan.loan.as_mut() {
                Some(loan) => bump("loan.annual_rate", &mut loan.annual_rate, Decimal::new(25, 2)),
                None => Ok(false),
            },
            Self::LoanStart => match plan.loan.as_mut() {
                Some(loan) => {
                    loan.start_month = step_month(loan.start_month, steps);
                    Ok(true)
                }
                None => Ok(false),
            },
            Self::Child => Ok(false),
            Self::ChildBirth => match plan.child.as_mut() {
                Some(child) => {
                    let months = chrono::Months::new(steps.unsigned_abs());
                    let moved = if steps >= 0 {
                        child.birth_date.checked_add_months(months)
                    } else {
                        child.birth_date.checked_sub_months(months)
                    };
                    if let Some(date) = moved {
                        child.birth_date = date;
                    }
                    Ok(true)
                }
                None => Ok(false),
            },
            Self::ChildCost => match plan.child.as_mut() {
                Some(child) => {
                    bump("child.monthly_cost", &mut child.monthly_cost, Decimal::from(50))
                }
                None => Ok(false),
            },
            Self::Fee(stage) => {
                let mut fee = plan.fees.fee(*stage);
                bump(&format!("fees.{}", stage_field(*stage)), &mut fee, Decimal::from(50))?;
                set_fee(plan, *stage, fee);
                Ok(true)
            }
            Self::Record(record) => match *record {
                RecordRef::Recurring(i) => match plan.recurring.get_mut(i) {
                    Some(e) => bump(&format!("recurring[{i}].amount"), &mut e.amount, hundred),
                    None => Ok(false),
                },
                RecordRef::ChildEvent(i) => match plan.child_events.get_mut(i) {
                    Some(e) => bump(&format!("child_events[{i}].amount"), &mut e.amount, hundred),
                    None => Ok(false),
                },
                RecordRef::Education(i) => match plan.education.get_mut(i) {
                    Some(e) => bump(&format!("education[{i}].amount"), &mut e.amount, hundred),
                    None => Ok(false),
                },
                RecordRef::Annual(i) => match plan.annual.get_mut(i) {
                    Some(e) => bump(&format!("annual[{i}].amount"), &mut e.amount, hundred),
                    None => Ok(false),
                },
            },
        }
    }
}

/// `value + steps * step`, or an error naming `field` when it does not fit.
fn stepped(
    field: &str,
    value: Decimal,
    steps: i32,
    step: Decimal,
) -> Result<Decimal, ValidationError> {
    Decimal::from(steps)
        .checked_mul(step)
        .and_then(|delta| value.checked_add(delta))
        .ok_or_else(|| ValidationError::AmountOverflow {
            field: field.to_string(),
        })
}

fn stage_field(stage: EducationStage) -> &'static str {
    match stage {
        EducationStage::Childcare => "childcare",
        EducationStage::Preschool => "preschool",
        EducationStage::PrimarySchool => "primary",
    }
}

fn set_fee(plan: &mut PlanInput, stage: EducationStage, fee: Decimal) {
    match stage {
        EducationStage::Childcare => plan.fees.childcare = fee,
        EducationStage::Preschool => plan.fees.preschool = fee,
        EducationStage::PrimarySchool => plan.fees.primary = fee,
    }
}

fn step_month(month: u32, steps: i32) -> u32 {
    let moved = i64::from(month) + i64::from(steps);
    u32::try_from(moved.clamp(0, i64::from(HORIZON_MONTHS - 1))).unwrap_or(0)
}
