use rust_decimal::Decimal;

use super::check_amount;
use crate::error::ValidationError;

/// Take-home pay, constant for every month of the horizon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthlyIncome {
    pub(crate) amount: Decimal,
}

impl MonthlyIncome {
    pub(crate) fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        check_amount("income.amount", self.amount)
    }
}
