//! Test-results snapshot loading.

use crate::errors::HealthError;
use crate::model::Snapshot;
use std::path::Path;

pub fn parse_snapshot(raw: &str, path: &Path) -> Result<Snapshot, HealthError> {
    serde_json::from_str(raw).map_err(|e| HealthError::snapshot_parse(path, e))
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot, HealthError> {
    let raw = std::fs::read_to_string(path).map_err(|e| HealthError::snapshot_read(path, e))?;
    let snapshot = parse_snapshot(&raw, path)?;
    tracing::debug!(
        path = %path.display(),
        tests = snapshot.all_jobs.tests.len(),
        "loaded test snapshot"
    );
    Ok(snapshot)
}
