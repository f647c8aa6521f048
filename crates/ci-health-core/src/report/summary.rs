//! Daily health summary: the single output record of a run.
//!
//! Assembly only. All classification happens in `classify`, `history` and
//! `trend`; this module merges their results, enriches per-test records with
//! resolved contacts and fixes the output order.

use crate::arch::Arch;
use crate::classify::{OutcomeCounts, SectionSummary, ALL_JOBS_SECTION};
use crate::config::MaintainerDirectory;
use crate::contacts::ContactResolver;
use crate::history::{self, TestAnalysis};
use crate::model::Snapshot;
use crate::trend::TrendReport;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct HealthSummary {
    /// Generation timestamp, RFC 3339 UTC.
    pub date: String,
    pub overall_pass_rate: u32,
    pub total_tests: usize,
    pub failed_count: usize,
    pub not_run_count: usize,
    pub running_count: usize,
    pub passed_count: usize,
    pub flaky_count: usize,
    pub ten_day_avg_failed: f64,
    pub ten_day_avg_flaky: f64,
    pub flaky_delta: f64,
    pub failed_delta: f64,
    /// "Improving", "Regressing" or "Stable".
    pub trend: String,
    pub trend_emoji: String,
    pub sections: Vec<SectionSummary>,
    /// Longest failure streak first.
    pub failing_tests: Vec<FailingTest>,
    pub failing_by_arch: BTreeMap<String, usize>,
    pub failing_arch_summary: String,
    /// Highest transition rate first.
    pub flaky_tests: Vec<FlakyTest>,
    pub flaky_by_arch: BTreeMap<String, usize>,
    pub flaky_arch_summary: String,
}

/// A test whose current status is `failed`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailingTest {
    pub name: String,
    pub arch: Arch,
    pub days_failing: u32,
    pub error_step: String,
    pub specific_failures: Vec<String>,
    /// Date of the most recent failed history entry.
    pub last_failure_date: Option<NaiveDate>,
    pub maintainers: Vec<String>,
    pub contacts: String,
    pub run_id: Option<serde_json::Value>,
    pub job_id: Option<serde_json::Value>,
}

/// A test whose full-history transition rate is above the flaky threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlakyTest {
    pub name: String,
    pub arch: Arch,
    pub flaky_rate: u32,
    pub transitions: u32,
    pub history_length: usize,
    pub maintainers: Vec<String>,
    pub contacts: String,
}

/// Count per architecture name, alphabetical.
pub fn count_by_arch(archs: impl IntoIterator<Item = Arch>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for arch in archs {
        *counts.entry(arch.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

/// `"s390x: 3, arm64: 1"`: count descending, then name. Empty map gives `""`.
pub fn arch_summary(counts: &BTreeMap<String, usize>) -> String {
    let mut items: Vec<(&String, &usize)> = counts.iter().collect();
    items.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    items
        .into_iter()
        .map(|(arch, n)| format!("{arch}: {n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn failing_test(analysis: &TestAnalysis<'_>, resolver: &ContactResolver<'_>) -> FailingTest {
    let test = analysis.test;
    let recent = history::recent_failure(&test.weather_history);
    FailingTest {
        name: test.name.clone(),
        arch: analysis.arch,
        days_failing: analysis.days_failing,
        error_step: history::error_step(test, recent),
        specific_failures: history::specific_failures(recent),
        last_failure_date: recent.map(|e| e.date),
        maintainers: test.maintainers.clone(),
        contacts: resolver.resolve(&test.maintainers),
        run_id: test.run_id.clone(),
        job_id: test.job_id.clone(),
    }
}

fn flaky_test(analysis: &TestAnalysis<'_>, resolver: &ContactResolver<'_>) -> Option<FlakyTest> {
    let score = analysis.flakiness.filter(|f| f.is_flaky())?;
    let test = analysis.test;
    Some(FlakyTest {
        name: test.name.clone(),
        arch: analysis.arch,
        flaky_rate: score.rate,
        transitions: score.transitions,
        history_length: score.history_length,
        maintainers: test.maintainers.clone(),
        contacts: resolver.resolve(&test.maintainers),
    })
}

/// Run the whole pipeline over a loaded snapshot.
pub fn build_summary(
    snapshot: &Snapshot,
    directory: &MaintainerDirectory,
    generated_at: DateTime<Utc>,
) -> HealthSummary {
    let tests = &snapshot.all_jobs.tests;
    let resolver = ContactResolver::new(directory);

    for t in tests.iter().filter(|t| t.name.trim().is_empty()) {
        tracing::warn!(status = %t.status, "test record without a name");
    }
    for id in tests
        .iter()
        .flat_map(|t| t.maintainers.iter())
        .filter(|id| directory.get(id).is_none())
    {
        tracing::debug!(maintainer = %id, "maintainer not in directory, using raw id");
    }

    let counts = OutcomeCounts::from_tests(tests);
    let analyses: Vec<TestAnalysis<'_>> = tests.iter().map(TestAnalysis::analyze).collect();

    let mut failing_tests: Vec<FailingTest> = analyses
        .iter()
        .filter(|a| a.test.status.is_failed())
        .map(|a| failing_test(a, &resolver))
        .collect();
    failing_tests.sort_by(|a, b| b.days_failing.cmp(&a.days_failing));

    let mut flaky_tests: Vec<FlakyTest> = analyses
        .iter()
        .filter_map(|a| flaky_test(a, &resolver))
        .collect();
    flaky_tests.sort_by(|a, b| b.flaky_rate.cmp(&a.flaky_rate));

    let trend = TrendReport::compute(tests, counts.failed, flaky_tests.len());

    let failing_by_arch = count_by_arch(failing_tests.iter().map(|t| t.arch));
    let flaky_by_arch = count_by_arch(flaky_tests.iter().map(|t| t.arch));

    tracing::info!(
        total = counts.total,
        failed = counts.failed,
        flaky = flaky_tests.len(),
        pass_rate = counts.pass_rate(),
        trend = trend.trend.label(),
        "built health summary"
    );

    HealthSummary {
        date: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        overall_pass_rate: counts.pass_rate(),
        total_tests: counts.total,
        failed_count: counts.failed,
        not_run_count: counts.not_run,
        running_count: counts.running,
        passed_count: counts.passed,
        flaky_count: flaky_tests.len(),
        ten_day_avg_failed: trend.ten_day_avg_failed,
        ten_day_avg_flaky: trend.ten_day_avg_flaky,
        flaky_delta: trend.flaky_delta,
        failed_delta: trend.failed_delta,
        trend: trend.trend.label().to_string(),
        trend_emoji: trend.trend.emoji().to_string(),
        sections: vec![SectionSummary::new(ALL_JOBS_SECTION, &counts)],
        failing_arch_summary: arch_summary(&failing_by_arch),
        failing_by_arch,
        failing_tests,
        flaky_arch_summary: arch_summary(&flaky_by_arch),
        flaky_by_arch,
        flaky_tests,
    }
}
