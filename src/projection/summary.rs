use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::engine::{ExpenseBreakdown, MonthlyLedgerEntry, Projection};
use super::MONTHS_PER_YEAR;
use crate::error::{PlanError, PlanResult};

/// Totals for one 12-month block of the projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct YearlySummary {
    /// 1-based plan year.
    pub(crate) year: u32,
    pub(crate) first_month: NaiveDate,
    pub(crate) last_month: NaiveDate,
    pub(crate) income: Decimal,
    pub(crate) expense: Decimal,
    pub(crate) net: Decimal,
    pub(crate) ending_balance: Decimal,
    pub(crate) breakdown: ExpenseBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProjectionSummary {
    pub(crate) years: Vec<YearlySummary>,
    pub(crate) starting_balance: Decimal,
    /// Cumulative balance at the last month of the horizon.
    pub(crate) projected_savings: Decimal,
    pub(crate) lowest_balance: Decimal,
    pub(crate) lowest_month: u32,
    /// Income over the whole horizon.
    pub(crate) total_income: Decimal,
    /// Sum of the yearly nets, equal to projected savings minus the starting balance.
    pub(crate) total_net: Decimal,
}

impl ProjectionSummary {
    /// True when the balance dips below zero at some point.
    pub(crate) fn has_deficit(&self) -> bool {
        self.lowest_balance < Decimal::ZERO
    }
}

fn summarize_year(year: u32, block: &[MonthlyLedgerEntry]) -> PlanResult<YearlySummary> {
    let (Some(first), Some(last)) = (block.first(), block.last()) else {
        return Err(PlanError::Computation {
            month: (year - 1) * MONTHS_PER_YEAR,
            reason: "empty year block",
        });
    };
    let overflow = PlanError::Computation {
        month: last.month,
        reason: "yearly total overflow",
    };

    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    let mut net = Decimal::ZERO;
    let mut breakdown = ExpenseBreakdown::default();
    for entry in block {
        income = income.checked_add(entry.total_income).ok_or(overflow.clone())?;
        expense = expense.checked_add(entry.total_expense).ok_or(overflow.clone())?;
        net = net.checked_add(entry.net).ok_or(overflow.clone())?;
        breakdown = breakdown
            .checked_add(&entry.breakdown)
            .ok_or(overflow.clone())?;
    }

    Ok(YearlySummary {
        year,
        first_month: first.date,
        last_month: last.date,
        income,
        expense,
        net,
        ending_balance: last.cumulative,
        breakdown,
    })
}

/// Rolls the monthly ledger up into consecutive 12-month blocks.
pub(crate) fn summarize(projection: &Projection) -> PlanResult<ProjectionSummary> {
    let years = projection
        .entries()
        .chunks(MONTHS_PER_YEAR as usize)
        .zip(1..)
        .map(|(block, year)| summarize_year(year, block))
        .collect::<PlanResult<Vec<_>>>()?;

    let (lowest_month, lowest_balance) = projection
        .entries()
        .iter()
        .min_by_key(|e| e.cumulative)
        .map_or((0, projection.starting_balance()), |e| (e.month, e.cumulative));

    let horizon_total = |value: fn(&YearlySummary) -> Decimal| {
        years
            .iter()
            .try_fold(Decimal::ZERO, |acc, y| acc.checked_add(value(y)))
            .ok_or(PlanError::Computation {
                month: projection.entries().len().saturating_sub(1) as u32,
                reason: "horizon total overflow",
            })
    };
    let total_income = horizon_total(|y| y.income)?;
    let total_net = horizon_total(|y| y.net)?;

    Ok(ProjectionSummary {
        years,
        starting_balance: projection.starting_balance(),
        projected_savings: projection.final_balance(),
        lowest_balance,
        lowest_month,
        total_income,
        total_net,
    })
}
