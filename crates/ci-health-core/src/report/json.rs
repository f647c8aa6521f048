use crate::errors::HealthError;
use crate::report::summary::HealthSummary;
use std::io::Write;
use std::path::Path;

/// Indented JSON, newline-terminated.
pub fn to_pretty_json(summary: &HealthSummary) -> Result<String, HealthError> {
    let mut json = serde_json::to_string_pretty(summary).map_err(HealthError::output)?;
    json.push('\n');
    Ok(json)
}

pub fn write_summary<W: Write>(summary: &HealthSummary, out: &mut W) -> Result<(), HealthError> {
    let json = to_pretty_json(summary)?;
    out.write_all(json.as_bytes()).map_err(HealthError::output)?;
    out.flush().map_err(HealthError::output)
}

pub fn write_summary_file(summary: &HealthSummary, out: &Path) -> Result<(), HealthError> {
    let json = to_pretty_json(summary)?;
    std::fs::write(out, json)
        .map_err(|e| HealthError::output(format!("{}: {}", out.display(), e)))
}
