mod csv_export;

pub(crate) use csv_export::{default_export_path, export_ledger};

#[cfg(test)]
#[path = "csv_export_tests.rs"]
mod tests;
