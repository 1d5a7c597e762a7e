use rust_decimal::Decimal;

use super::{check_amount, check_label, MonthRange};
use crate::error::ValidationError;

/// A monthly cost such as groceries or utilities, optionally limited to part of the horizon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecurringExpense {
    pub(crate) label: String,
    pub(crate) amount: Decimal,
    pub(crate) active: MonthRange,
}

impl RecurringExpense {
    pub(crate) fn new(label: String, amount: Decimal) -> Self {
        Self {
            label,
            amount,
            active: MonthRange::whole(),
        }
    }

    pub(crate) fn is_active(&self, month: u32) -> bool {
        self.active.contains(month)
    }

    pub(crate) fn validate(&self, field: &str) -> Result<(), ValidationError> {
        check_label(&format!("{field}.label"), &self.label)?;
        check_amount(&format!("{field}.amount"), self.amount)?;
        self.active.validate(&format!("{field}.months"))
    }
}
