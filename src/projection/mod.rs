//! Monthly cash-flow projection over the fixed planning horizon and its yearly roll-up.

mod engine;
mod summary;

pub(crate) use engine::{project, ExpenseBreakdown, MonthlyLedgerEntry, Projection};
pub(crate) use summary::{summarize, ProjectionSummary, YearlySummary};

/// Length of every projection: six years of months.
pub(crate) const HORIZON_MONTHS: u32 = 72;

/// Months per summary block.
pub(crate) const MONTHS_PER_YEAR: u32 = 12;
