//! Load both inputs and build the summary. Inputs are read in full before any
//! computation; nothing is written here.

use crate::config::load_config;
use crate::errors::HealthError;
use crate::input::load_snapshot;
use crate::report::summary::{build_summary, HealthSummary};
use chrono::{DateTime, Utc};
use std::path::Path;

pub fn summarize_files(
    data: &Path,
    config: &Path,
    generated_at: DateTime<Utc>,
) -> Result<HealthSummary, HealthError> {
    let snapshot = load_snapshot(data)?;
    let cfg = load_config(config)?;
    Ok(build_summary(&snapshot, &cfg.maintainers, generated_at))
}
