use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter (same syntax as `RUST_LOG`).
pub(crate) const LOG_ENV: &str = "FAMILYPLAN_LOG";
const DEFAULT_LOG_FILTER: &str = "familyplan=info";
const LOG_FILE: &str = "familyplan.log";

pub(crate) fn data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "familyplan", "FamilyPlan")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

/// Installs the global tracing subscriber, appending to `familyplan.log` in the data directory.
///
/// The TUI owns the terminal, so nothing is ever written to stdout or stderr.
pub(crate) fn init_logging() -> Result<PathBuf> {
    let path = data_dir()?.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    fmt()
        .with_env_filter(log_filter(std::env::var(LOG_ENV).ok().as_deref()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))?;
    Ok(path)
}

/// Filter from the environment value, falling back to the default when unset or unparsable.
pub(crate) fn log_filter(value: Option<&str>) -> EnvFilter {
    value
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn rendered(filter: EnvFilter) -> String {
        filter.to_string().to_lowercase()
    }

    #[test]
    fn test_log_filter_default() {
        assert_eq!(rendered(log_filter(None)), DEFAULT_LOG_FILTER);
        assert_eq!(rendered(log_filter(Some("  "))), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_log_filter_from_env_value() {
        assert_eq!(rendered(log_filter(Some("familyplan=debug"))), "familyplan=debug");
    }

    #[test]
    fn test_log_filter_rejects_unknown_level() {
        assert_eq!(rendered(log_filter(Some("familyplan=loud"))), DEFAULT_LOG_FILTER);
    }
}
