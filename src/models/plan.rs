use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use super::*;
use crate::error::ValidationError;

/// Everything the projection engine needs, captured from the current form state.
///
/// The TUI owns one of these as its session state and hands it to
/// [`crate::projection::project`] after every accepted edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanInput {
    /// First day of the calendar month that is month index 0.
    pub(crate) start: NaiveDate,
    pub(crate) starting_balance: Decimal,
    pub(crate) income: MonthlyIncome,
    pub(crate) loan: Option<HousingLoan>,
    pub(crate) recurring: Vec<RecurringExpense>,
    pub(crate) child_events: Vec<ChildEvent>,
    pub(crate) education: Vec<EducationExpense>,
    pub(crate) annual: Vec<AnnualExpense>,
    pub(crate) child: Option<ChildProfile>,
    pub(crate) fees: EducationFees,
}

/// Points at one row of a record list, for deletion from the Plan screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecordRef {
    Recurring(usize),
    ChildEvent(usize),
    Education(usize),
    Annual(usize),
}

impl PlanInput {
    /// An empty plan: no income, no costs, zero balance.
    pub(crate) fn new(start: NaiveDate) -> Self {
        Self {
            start: first_of_month(start),
            starting_balance: Decimal::ZERO,
            income: MonthlyIncome::new(Decimal::ZERO),
            loan: None,
            recurring: Vec::new(),
            child_events: Vec::new(),
            education: Vec::new(),
            annual: Vec::new(),
            child: None,
            fees: EducationFees::default(),
        }
    }

    /// The plan a new session opens with: a couple expecting a child in three months.
    pub(crate) fn sample(start: NaiveDate) -> Self {
        let mut plan = Self::new(start);
        let start = plan.start;
        plan.income = MonthlyIncome::new(Decimal::from(5000));
        plan.loan = Some(HousingLoan::new(Decimal::from(1500)));
        plan.recurring
            .push(RecurringExpense::new("Living expenses".into(), Decimal::from(2000)));
        plan.annual = vec![
            AnnualExpense::new(AnnualKind::Insurance, Decimal::from(2000), 1),
            AnnualExpense::new(AnnualKind::Tax, Decimal::from(3000), plan_month_of_year(start, 4)),
            AnnualExpense::new(
                AnnualKind::Bonus,
                Decimal::from(10000),
                plan_month_of_year(start, 12),
            ),
        ];
        plan.child = Some(ChildProfile::new(
            ChildStatus::Due,
            start.checked_add_months(Months::new(3)).unwrap_or(start),
            Decimal::from(500),
        ));
        plan.fees = EducationFees {
            childcare: Decimal::from(1000),
            preschool: Decimal::from(1200),
            primary: Decimal::from(300),
        };
        plan
    }

    /// Rejects the first invalid field, in form order.
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        self.income.validate()?;
        if let Some(loan) = &self.loan {
            loan.validate()?;
        }
        for (i, expense) in self.recurring.iter().enumerate() {
            expense.validate(&format!("recurring[{i}]"))?;
        }
        for (i, event) in self.child_events.iter().enumerate() {
            event.validate(&format!("child_events[{i}]"))?;
        }
        for (i, expense) in self.education.iter().enumerate() {
            expense.validate(&format!("education[{i}]"))?;
        }
        for (i, expense) in self.annual.iter().enumerate() {
            expense.validate(&format!("annual[{i}]"))?;
        }
        self.fees.validate()?;
        if let Some(child) = &self.child {
            child.validate(self.start)?;
        }
        Ok(())
    }

    /// Explicit education rows followed by the ones implied by the child profile.
    pub(crate) fn education_expenses(&self) -> Vec<EducationExpense> {
        let mut all = self.education.clone();
        if let Some(child) = &self.child {
            all.extend(self.fees.derive(child, self.start));
        }
        all
    }

    pub(crate) fn child_cost_at(&self, month: u32) -> Decimal {
        self.child
            .as_ref()
            .map_or(Decimal::ZERO, |c| c.monthly_cost_at(self.start, month))
    }

    /// Calendar month of a month index.
    pub(crate) fn month_date(&self, month: u32) -> Option<NaiveDate> {
        month_date(self.start, month)
    }

    /// Moves the projection start. Month offsets stay as they are; annual items keep their
    /// calendar month, so a December bonus is still paid in December.
    pub(crate) fn set_start(&mut self, start: NaiveDate) {
        let previous = self.start;
        self.start = first_of_month(start);
        for item in &mut self.annual {
            let calendar = calendar_month_of(previous, item.month_of_year);
            item.month_of_year = plan_month_of_year(self.start, calendar);
        }
    }

    /// Adds a one-time event and keeps the list ordered by month.
    pub(crate) fn add_child_event(&mut self, event: ChildEvent) {
        self.child_events.push(event);
        self.child_events.sort_by_key(|e| e.month);
    }

    pub(crate) fn remove(&mut self, record: RecordRef) -> bool {
        fn take<T>(list: &mut Vec<T>, i: usize) -> bool {
            if i < list.len() {
                list.remove(i);
                true
            } else {
                false
            }
        }
        match record {
            RecordRef::Recurring(i) => take(&mut self.recurring, i),
            RecordRef::ChildEvent(i) => take(&mut self.child_events, i),
            RecordRef::Education(i) => take(&mut self.education, i),
            RecordRef::Annual(i) => take(&mut self.annual, i),
        }
    }
}
