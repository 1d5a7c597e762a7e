use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::projection::Projection;

const HEADER: [&str; 13] = [
    "month",
    "date",
    "income",
    "housing",
    "living",
    "child",
    "education",
    "one_time",
    "annual",
    "bonus",
    "total_expense",
    "net",
    "cumulative",
];

/// Write the monthly ledger as CSV. Returns the number of data rows written.
pub(crate) fn write_ledger<W: Write>(writer: W, projection: &Projection) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER).context("Failed to write CSV header")?;

    for entry in projection.entries() {
        let b = &entry.breakdown;
        wtr.write_record([
            entry.month.to_string(),
            entry.date.format("%Y-%m").to_string(),
            format!("{:.2}", entry.total_income),
            format!("{:.2}", b.housing),
            format!("{:.2}", b.living),
            format!("{:.2}", b.child),
            format!("{:.2}", b.education),
            format!("{:.2}", b.one_time),
            format!("{:.2}", b.annual),
            format!("{:.2}", b.bonus),
            format!("{:.2}", entry.total_expense),
            format!("{:.2}", entry.net),
            format!("{:.2}", entry.cumulative),
        ])
        .with_context(|| format!("Failed to write month {}", entry.month))?;
    }

    wtr.flush().context("Failed to flush CSV output")?;
    Ok(projection.entries().len())
}

pub(crate) fn export_ledger(path: &Path, projection: &Projection) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let rows = write_ledger(file, projection)?;
    tracing::info!(path = %path.display(), rows, "exported monthly ledger");
    Ok(rows)
}

/// `~/familyplan-<YYYY-MM>.csv`, named after the projection's first month.
pub(crate) fn default_export_path(projection: &Projection) -> PathBuf {
    let home = directories::UserDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    let suffix = projection
        .entries()
        .first()
        .map_or_else(|| "plan".to_string(), |e| e.date.format("%Y-%m").to_string());
    home.join(format!("familyplan-{suffix}.csv"))
}
