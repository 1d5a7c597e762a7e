use rust_decimal::Decimal;

use super::check_amount;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AnnualKind {
    Insurance,
    Tax,
    /// Income paid once a year; modelled as a negative expense.
    Bonus,
    Other,
}

impl AnnualKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Insurance => "Insurance",
            Self::Tax => "Tax",
            Self::Bonus => "Bonus",
            Self::Other => "Other",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "insurance" => Some(Self::Insurance),
            "tax" | "taxes" => Some(Self::Tax),
            "bonus" => Some(Self::Bonus),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [AnnualKind] {
        &[Self::Insurance, Self::Tax, Self::Bonus, Self::Other]
    }
}

impl std::fmt::Display for AnnualKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A once-a-year item applied at a fixed plan month-of-year (1 = the start month).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AnnualExpense {
    pub(crate) kind: AnnualKind,
    pub(crate) amount: Decimal,
    pub(crate) month_of_year: u32,
}

impl AnnualExpense {
    pub(crate) fn new(kind: AnnualKind, amount: Decimal, month_of_year: u32) -> Self {
        Self {
            kind,
            amount,
            month_of_year,
        }
    }

    pub(crate) fn applies(&self, month: u32) -> bool {
        month % 12 + 1 == self.month_of_year
    }

    pub(crate) fn validate(&self, field: &str) -> Result<(), ValidationError> {
        check_amount(&format!("{field}.amount"), self.amount)?;
        if !(1..=12).contains(&self.month_of_year) {
            return Err(ValidationError::InvalidMonthOfYear {
                field: format!("{field}.month"),
                value: self.month_of_year,
            });
        }
        Ok(())
    }
}
