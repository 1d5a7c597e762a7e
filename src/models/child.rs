use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{check_amount, check_label, checked_month, months_between, MonthRange};
use crate::error::ValidationError;

/// Category of a one-time child-related cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChildEventKind {
    MaternityCheckup,
    Delivery,
    Confinement,
    Education,
    Other,
}

impl ChildEventKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::MaternityCheckup => "Maternity Checkup",
            Self::Delivery => "Delivery",
            Self::Confinement => "Confinement",
            Self::Education => "Education",
            Self::Other => "Other",
        }
    }

    pub(crate) fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "checkup" | "maternity" | "maternity checkup" | "prenatal" => Self::MaternityCheckup,
            "delivery" | "birth" => Self::Delivery,
            "confinement" => Self::Confinement,
            "education" | "school" => Self::Education,
            _ => Self::Other,
        }
    }

    pub(crate) fn all() -> &'static [ChildEventKind] {
        &[
            Self::MaternityCheckup,
            Self::Delivery,
            Self::Confinement,
            Self::Education,
            Self::Other,
        ]
    }
}

impl std::fmt::Display for ChildEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A one-time cost charged in a single month of the horizon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChildEvent {
    pub(crate) name: String,
    pub(crate) kind: ChildEventKind,
    pub(crate) month: u32,
    pub(crate) amount: Decimal,
}

impl ChildEvent {
    pub(crate) fn new(name: String, kind: ChildEventKind, month: u32, amount: Decimal) -> Self {
        Self {
            name,
            kind,
            month,
            amount,
        }
    }

    pub(crate) fn validate(&self, field: &str) -> Result<(), ValidationError> {
        check_label(&format!("{field}.name"), &self.name)?;
        check_amount(&format!("{field}.amount"), self.amount)?;
        checked_month(&format!("{field}.month"), i64::from(self.month))?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChildStatus {
    Born,
    Due,
    Planned,
}

impl ChildStatus {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Born => "born",
            Self::Due => "due",
            Self::Planned => "planned",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "born" => Some(Self::Born),
            "due" | "expected" => Some(Self::Due),
            "planned" | "planning" => Some(Self::Planned),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [ChildStatus] {
        &[Self::Born, Self::Due, Self::Planned]
    }
}

impl std::fmt::Display for ChildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Child age bands (in months) for each schooling stage.
pub(crate) const CHILDCARE_AGES: (i64, i64) = (6, 48);
pub(crate) const PRESCHOOL_AGES: (i64, i64) = (48, 84);
pub(crate) const PRIMARY_FROM_AGE: i64 = 84;

/// The household's child, born or expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChildProfile {
    pub(crate) status: ChildStatus,
    pub(crate) birth_date: NaiveDate,
    /// Regular monthly cost (food, diapers, clothes) from the birth month on.
    pub(crate) monthly_cost: Decimal,
}

impl ChildProfile {
    pub(crate) fn new(status: ChildStatus, birth_date: NaiveDate, monthly_cost: Decimal) -> Self {
        Self {
            status,
            birth_date,
            monthly_cost,
        }
    }

    /// Age in months at month index 0. Negative while the child is not yet born.
    pub(crate) fn age_at_start(&self, start: NaiveDate) -> i64 {
        months_between(self.birth_date, start)
    }

    pub(crate) fn age_at(&self, start: NaiveDate, month: u32) -> i64 {
        self.age_at_start(start) + i64::from(month)
    }

    /// Month indices during which the child's age lies in `[from_age, to_age)`.
    pub(crate) fn months_aged(&self, start: NaiveDate, from_age: i64, to_age: i64) -> Option<MonthRange> {
        let age0 = self.age_at_start(start);
        MonthRange::clipped(from_age - age0, to_age.saturating_sub(age0))
    }

    pub(crate) fn monthly_cost_at(&self, start: NaiveDate, month: u32) -> Decimal {
        if self.age_at(start, month) >= 0 {
            self.monthly_cost
        } else {
            Decimal::ZERO
        }
    }

    pub(crate) fn validate(&self, start: NaiveDate) -> Result<(), ValidationError> {
        check_amount("child.monthly_cost", self.monthly_cost)?;
        let age0 = self.age_at_start(start);
        let consistent = match self.status {
            ChildStatus::Born => age0 >= 0,
            ChildStatus::Due | ChildStatus::Planned => age0 <= 0,
        };
        if !consistent {
            return Err(ValidationError::ChildStatusMismatch {
                field: "child.birth_date".into(),
                status: self.status.to_string(),
                birth: self.birth_date.format("%Y-%m").to_string(),
            });
        }
        Ok(())
    }
}
