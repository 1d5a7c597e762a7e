use rust_decimal::Decimal;
use thiserror::Error;

/// Input rejected before it reaches the projection engine.
///
/// Every variant carries the path of the offending field (e.g. `recurring[1].amount`) so the
/// message can be shown as-is in the status bar or on stderr.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ValidationError {
    #[error("{field}: amount must not be negative (got {value})")]
    NegativeAmount { field: String, value: Decimal },

    #[error("{field}: '{input}' is not a valid amount")]
    MalformedAmount { field: String, input: String },

    #[error("{field}: month {month} is outside the projection horizon (0-71)")]
    MonthOutOfHorizon { field: String, month: i64 },

    #[error("{field}: '{input}' is not a valid month")]
    MalformedMonth { field: String, input: String },

    #[error("{field}: month range {start}..{end} is empty or outside the horizon")]
    InvalidRange { field: String, start: u32, end: u32 },

    #[error("{field}: month of year must be 1-12 (got {value})")]
    InvalidMonthOfYear { field: String, value: u32 },

    #[error("{field}: '{input}' is not a valid date (use YYYY-MM-DD or YYYY-MM)")]
    MalformedDate { field: String, input: String },

    #[error("{field}: label must not be empty")]
    EmptyLabel { field: String },

    #[error("{field}: value is missing")]
    MissingValue { field: String },

    #[error("{field}: value is too large")]
    AmountOverflow { field: String },

    #[error("{field}: unknown value '{input}' (expected one of: {expected})")]
    UnknownKeyword {
        field: String,
        input: String,
        expected: String,
    },

    #[error("{field}: installment {installment} does not cover the first month's interest {interest}")]
    LoanNeverAmortizes {
        field: String,
        installment: Decimal,
        interest: Decimal,
    },

    #[error("{field}: a child marked '{status}' cannot have a birth month of {birth}")]
    ChildStatusMismatch {
        field: String,
        status: String,
        birth: String,
    },
}

impl ValidationError {
    /// Path of the field that failed validation.
    pub(crate) fn field(&self) -> &str {
        match self {
            Self::NegativeAmount { field, .. }
            | Self::MalformedAmount { field, .. }
            | Self::MonthOutOfHorizon { field, .. }
            | Self::MalformedMonth { field, .. }
            | Self::InvalidRange { field, .. }
            | Self::InvalidMonthOfYear { field, .. }
            | Self::MalformedDate { field, .. }
            | Self::EmptyLabel { field }
            | Self::MissingValue { field }
            | Self::AmountOverflow { field }
            | Self::UnknownKeyword { field, .. }
            | Self::LoanNeverAmortizes { field, .. }
            | Self::ChildStatusMismatch { field, .. } => field,
        }
    }
}

/// Failure of a projection run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum PlanError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Arithmetic overflowed. Validated input with realistic amounts never gets here.
    #[error("computation failed at month {month}: {reason}")]
    Computation { month: u32, reason: &'static str },
}

pub(crate) type PlanResult<T> = Result<T, PlanError>;
