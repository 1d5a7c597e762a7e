use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::HORIZON_MONTHS;
use crate::error::{PlanError, PlanResult};
use crate::models::{AnnualKind, PlanInput};

/// Where a month's expense went. `bonus` is income folded in as a negative expense.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ExpenseBreakdown {
    pub(crate) housing: Decimal,
    pub(crate) living: Decimal,
    pub(crate) child: Decimal,
    pub(crate) education: Decimal,
    pub(crate) one_time: Decimal,
    pub(crate) annual: Decimal,
    pub(crate) bonus: Decimal,
}

impl ExpenseBreakdown {
    /// Net expense: every category minus the bonus.
    pub(crate) fn total(&self) -> Option<Decimal> {
        checked_sum([
            self.housing,
            self.living,
            self.child,
            self.education,
            self.one_time,
            self.annual,
        ])?
        .checked_sub(self.bonus)
    }

    pub(crate) fn checked_add(&self, other: &Self) -> Option<Self> {
        Some(Self {
            housing: self.housing.checked_add(other.housing)?,
            living: self.living.checked_add(other.living)?,
            child: self.child.checked_add(other.child)?,
            education: self.education.checked_add(other.education)?,
            one_time: self.one_time.checked_add(other.one_time)?,
            annual: self.annual.checked_add(other.annual)?,
            bonus: self.bonus.checked_add(other.bonus)?,
        })
    }
}

/// One month of the projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthlyLedgerEntry {
    pub(crate) month: u32,
    /// First day of the calendar month.
    pub(crate) date: NaiveDate,
    pub(crate) total_income: Decimal,
    pub(crate) total_expense: Decimal,
    pub(crate) net: Decimal,
    pub(crate) cumulative: Decimal,
    pub(crate) breakdown: ExpenseBreakdown,
}

/// Engine output: exactly [`HORIZON_MONTHS`] entries in month order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Projection {
    starting_balance: Decimal,
    entries: Vec<MonthlyLedgerEntry>,
}

impl Projection {
    pub(crate) fn entries(&self) -> &[MonthlyLedgerEntry] {
        &self.entries
    }

    pub(crate) fn starting_balance(&self) -> Decimal {
        self.starting_balance
    }

    /// Cumulative balance after the last month: the projected savings.
    pub(crate) fn final_balance(&self) -> Decimal {
        self.entries
            .last()
            .map_or(self.starting_balance, |e| e.cumulative)
    }
}

fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
}

/// Validates `plan` and rolls it forward month by month.
pub(crate) fn project(plan: &PlanInput) -> PlanResult<Projection> {
    plan.validate()?;

    let loan_payments = match &plan.loan {
        Some(loan) => loan.schedule(HORIZON_MONTHS)?,
        None => Vec::new(),
    };
    let education = plan.education_expenses();
    let income = plan.income.amount;

    let mut cumulative = plan.starting_balance;
    let mut entries = Vec::with_capacity(HORIZON_MONTHS as usize);

    for month in 0..HORIZON_MONTHS {
        let overflow = |reason: &'static str| PlanError::Computation { month, reason };

        let annual_due = || plan.annual.iter().filter(move |a| a.applies(month));
        let breakdown = ExpenseBreakdown {
            housing: loan_payments
                .get(month as usize)
                .map_or(Decimal::ZERO, |p| p.payment),
            living: checked_sum(
                plan.recurring
                    .iter()
                    .filter(|e| e.is_active(month))
                    .map(|e| e.amount),
            )
            .ok_or_else(|| overflow("recurring expenses overflow"))?,
            child: plan.child_cost_at(month),
            education: checked_sum(
                education
                    .iter()
                    .filter(|e| e.is_active(month))
                    .map(|e| e.amount),
            )
            .ok_or_else(|| overflow("education expenses overflow"))?,
            one_time: checked_sum(
                plan.child_events
                    .iter()
                    .filter(|e| e.month == month)
                    .map(|e| e.amount),
            )
            .ok_or_else(|| overflow("one-time expenses overflow"))?,
            annual: checked_sum(
                annual_due()
                    .filter(|a| a.kind != AnnualKind::Bonus)
                    .map(|a| a.amount),
            )
            .ok_or_else(|| overflow("annual expenses overflow"))?,
            bonus: checked_sum(
                annual_due()
                    .filter(|a| a.kind == AnnualKind::Bonus)
                    .map(|a| a.amount),
            )
            .ok_or_else(|| overflow("bonus overflow"))?,
        };

        let total_expense = breakdown
            .total()
            .ok_or_else(|| overflow("total expense overflow"))?;
        let net = income
            .checked_sub(total_expense)
            .ok_or_else(|| overflow("net savings overflow"))?;
        cumulative = cumulative
            .checked_add(net)
            .ok_or_else(|| overflow("cumulative balance overflow"))?;
        let date = plan
            .month_date(month)
            .ok_or_else(|| overflow("calendar out of range"))?;

        entries.push(MonthlyLedgerEntry {
            month,
            date,
            total_income: income,
            total_expense,
            net,
            cumulative,
            breakdown,
        });
    }

    let projection = Projection {
        starting_balance: plan.starting_balance,
        entries,
    };
    tracing::debug!(
        months = projection.entries.len(),
        projected_savings = %projection.final_balance(),
        "projection computed"
    );
    Ok(projection)
}
