mod annual;
mod child;
mod education;
mod expense;
mod income;
mod loan;
mod month;
mod plan;

pub(crate) use annual::{AnnualExpense, AnnualKind};
pub(crate) use child::{ChildEvent, ChildEventKind, ChildProfile, ChildStatus};
pub(crate) use education::{EducationExpense, EducationFees, EducationStage};
pub(crate) use expense::RecurringExpense;
pub(crate) use income::MonthlyIncome;
pub(crate) use loan::{HousingLoan, LoanPayment};
pub(crate) use month::{
    calendar_month_of, checked_month, first_of_month, month_date, months_between,
    plan_month_of_year, MonthRange,
};
pub(crate) use plan::{PlanInput, RecordRef};

use rust_decimal::Decimal;

use crate::error::ValidationError;

pub(crate) fn check_amount(field: &str, value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

pub(crate) fn check_label(field: &str, label: &str) -> Result<(), ValidationError> {
    if label.trim().is_empty() {
        return Err(ValidationError::EmptyLabel {
            field: field.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests;
