//! Input data model: the test-results snapshot as produced by the collector.
//!
//! Wire names follow the collector's camelCase JSON. Every field except
//! `name` is optional and falls back to an empty/neutral value.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Status of a test run, either current or in a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum TestStatus {
    Passed,
    Failed,
    Running,
    NotRun,
    /// No status recorded (`"none"`, `null` or absent).
    #[default]
    None,
    /// Any other collector status, kept verbatim.
    Other(String),
}

impl TestStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "passed" => Self::Passed,
            "failed" => Self::Failed,
            "running" => Self::Running,
            "not_run" => Self::NotRun,
            "none" => Self::None,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Running => "running",
            Self::NotRun => "not_run",
            Self::None => "none",
            Self::Other(s) => s,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// `not_run` and `none` are merged for the not-run count only.
    pub fn is_not_run(&self) -> bool {
        matches!(self, Self::NotRun | Self::None)
    }
}

impl From<Option<String>> for TestStatus {
    fn from(raw: Option<String>) -> Self {
        match raw {
            Some(s) => Self::parse(&s),
            None => Self::None,
        }
    }
}

impl From<TestStatus> for String {
    fn from(status: TestStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole snapshot document. Only the "all jobs" section is consumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "allJobs", alias = "all_jobs", default)]
    pub all_jobs: JobSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobSection {
    #[serde(default)]
    pub tests: Vec<TestRecord>,
}

/// One monitored test.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRecord {
    pub name: String,
    #[serde(default)]
    pub status: TestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<TestError>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weather_history: Vec<HistoryEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub maintainers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
}

/// One daily status snapshot of a test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(deserialize_with = "calendar_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub status: TestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_details: Option<FailureDetails>,
}

impl HistoryEntry {
    pub fn new(date: NaiveDate, status: TestStatus) -> Self {
        Self {
            date,
            status,
            failure_step: None,
            failure_details: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailureDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub failures: Vec<NamedFailure>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedFailure {
    #[serde(default)]
    pub name: String,
}

pub(crate) fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp, or a date followed by a time
/// without offset (`2024-01-03 04:15:00`), and keeps the calendar day.
fn calendar_date<'de, D>(d: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(d)?;
    parse_calendar_date(&raw).map_err(serde::de::Error::custom)
}

pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.date_naive());
    }
    NaiveDate::parse_and_remainder(trimmed, "%Y-%m-%d")
        .ok()
        .filter(|(_, rest)| rest.starts_with([' ', 'T', 't']))
        .map(|(date, _)| date)
        .ok_or_else(|| format!("invalid history date {trimmed:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing_keeps_unknown_verbatim() {
        assert_eq!(TestStatus::parse("failed"), TestStatus::Failed);
        assert_eq!(TestStatus::parse("not_run"), TestStatus::NotRun);
        assert_eq!(
            TestStatus::parse("cancelled"),
            TestStatus::Other("cancelled".into())
        );
        assert_eq!(TestStatus::Other("cancelled".into()).as_str(), "cancelled");
    }

    #[test]
    fn test_record_tolerates_missing_and_null_fields() {
        let rec: TestRecord = serde_json::from_value(serde_json::json!({
            "name": "k8s-smoke [arm64]",
            "status": null,
            "weatherHistory": null,
            "maintainers": null,
            "runId": 12345
        }))
        .unwrap();

        assert_eq!(rec.status, TestStatus::None);
        assert!(rec.weather_history.is_empty());
        assert!(rec.maintainers.is_empty());
        assert!(rec.error.is_none());
        assert_eq!(rec.run_id, Some(serde_json::json!(12345)));
        assert!(rec.job_id.is_none());
    }

    #[test]
    fn test_history_entry_accepts_timestamp_dates() {
        let entry: HistoryEntry = serde_json::from_value(serde_json::json!({
            "date": "2024-01-03T04:15:00Z",
            "status": "failed",
            "failureStep": "Run tests",
            "failureDetails": { "failures": [{ "name": "k8s-confidential.bats" }] }
        }))
        .unwrap();

        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(entry.failure_step.as_deref(), Some("Run tests"));
        assert_eq!(
            entry.failure_details.unwrap().failures[0].name,
            "k8s-confidential.bats"
        );
    }

    #[test]
    fn test_history_date_without_offset_keeps_day() {
        let snap: Snapshot = serde_json::from_str(
            r#"{"allJobs": {"tests": [{"name": "a", "weatherHistory": [
                {"date": "2024-01-02", "status": "passed"},
                {"date": "2024-01-03 04:15:00", "status": "failed"},
                {"date": "2024-01-04T23:59:59.123", "status": "passed"}
            ]}]}}"#,
        )
        .unwrap();
        let dates: Vec<NaiveDate> = snap.all_jobs.tests[0]
            .weather_history
            .iter()
            .map(|e| e.date)
            .collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            ]
        );
        assert!(parse_calendar_date("2024-01-03garbage").is_err());
    }

    #[test]
    fn test_invalid_history_date_is_rejected() {
        let res: Result<HistoryEntry, _> = serde_json::from_value(serde_json::json!({
            "date": "yesterday",
            "status": "passed"
        }));
        assert!(res.is_err());
    }

    #[test]
    fn test_snapshot_accepts_snake_case_section() {
        let snap: Snapshot = serde_json::from_value(serde_json::json!({
            "all_jobs": { "tests": [{ "name": "a" }] },
            "generatedBy": "collector"
        }))
        .unwrap();
        assert_eq!(snap.all_jobs.tests.len(), 1);
    }
}
