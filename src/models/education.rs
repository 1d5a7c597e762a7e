use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::child::{ChildProfile, CHILDCARE_AGES, PRESCHOOL_AGES, PRIMARY_FROM_AGE};
use super::{check_amount, MonthRange};
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EducationStage {
    Childcare,
    Preschool,
    PrimarySchool,
}

impl EducationStage {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Childcare => "Childcare",
            Self::Preschool => "Preschool",
            Self::PrimarySchool => "Primary School",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "childcare" | "infantcare" | "daycare" => Some(Self::Childcare),
            "preschool" | "kindergarten" | "k" => Some(Self::Preschool),
            "primary" | "primary school" | "school" => Some(Self::PrimarySchool),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [EducationStage] {
        &[Self::Childcare, Self::Preschool, Self::PrimarySchool]
    }
}

impl std::fmt::Display for EducationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Monthly school fee charged over a range of months.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EducationExpense {
    pub(crate) stage: EducationStage,
    pub(crate) amount: Decimal,
    pub(crate) active: MonthRange,
}

impl EducationExpense {
    pub(crate) fn new(stage: EducationStage, amount: Decimal, active: MonthRange) -> Self {
        Self {
            stage,
            amount,
            active,
        }
    }

    pub(crate) fn is_active(&self, month: u32) -> bool {
        self.active.contains(month)
    }

    pub(crate) fn validate(&self, field: &str) -> Result<(), ValidationError> {
        check_amount(&format!("{field}.amount"), self.amount)?;
        self.active.validate(&format!("{field}.months"))
    }
}

/// Monthly fee per schooling stage, applied by the child's age.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct EducationFees {
    pub(crate) childcare: Decimal,
    pub(crate) preschool: Decimal,
    pub(crate) primary: Decimal,
}

impl EducationFees {
    pub(crate) fn fee(&self, stage: EducationStage) -> Decimal {
        match stage {
            EducationStage::Childcare => self.childcare,
            EducationStage::Preschool => self.preschool,
            EducationStage::PrimarySchool => self.primary,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        check_amount("fees.childcare", self.childcare)?;
        check_amount("fees.preschool", self.preschool)?;
        check_amount("fees.primary", self.primary)
    }

    /// School fees implied by the child's age over the horizon. Stages with a zero fee or that
    /// fall outside the horizon are left out.
    pub(crate) fn derive(&self, child: &ChildProfile, start: NaiveDate) -> Vec<EducationExpense> {
        let bands = [
            (EducationStage::Childcare, CHILDCARE_AGES.0, CHILDCARE_AGES.1),
            (EducationStage::Preschool, PRESCHOOL_AGES.0, PRESCHOOL_AGES.1),
            (EducationStage::PrimarySchool, PRIMARY_FROM_AGE, i64::MAX),
        ];

        bands
            .into_iter()
            .filter(|(stage, _, _)| self.fee(*stage) > Decimal::ZERO)
            .filter_map(|(stage, from, to)| {
                child
                    .months_aged(start, from, to)
                    .map(|range| EducationExpense::new(stage, self.fee(stage), range))
            })
            .collect()
    }
}
