//! Per-test weather-history analysis: failure streaks, flakiness and the most
//! recent failure of currently failing tests.
//!
//! Histories may arrive unordered. Every derivation here works on a copy sorted
//! by date; entries sharing a date keep their snapshot order.

use crate::arch::Arch;
use crate::model::{HistoryEntry, TestRecord};

/// Histories shorter than this are never judged flaky.
pub const MIN_FLAKY_HISTORY: usize = 5;
/// A test is flaky when its transition rate is strictly above this percentage.
pub const FLAKY_RATE_THRESHOLD: u32 = 30;
/// Step reported when neither the test nor its history names one.
pub const UNKNOWN_STEP: &str = "Unknown";

/// History sorted oldest to newest. Stable, so same-day entries keep input order.
pub fn chronological(history: &[HistoryEntry]) -> Vec<&HistoryEntry> {
    let mut sorted: Vec<&HistoryEntry> = history.iter().collect();
    sorted.sort_by_key(|e| e.date);
    sorted
}

/// Length of the trailing run of failed entries at the most recent end.
pub fn days_failing(history: &[HistoryEntry]) -> u32 {
    chronological(history)
        .iter()
        .rev()
        .take_while(|e| e.status.is_failed())
        .count() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flakiness {
    /// Adjacent chronological pairs whose statuses differ.
    pub transitions: u32,
    /// `round(transitions / (len - 1) * 100)`.
    pub rate: u32,
    pub history_length: usize,
}

impl Flakiness {
    pub fn is_flaky(&self) -> bool {
        self.rate > FLAKY_RATE_THRESHOLD
    }
}

/// Transition rate over the full history. `None` when the history is too short
/// to judge. Any status change counts, including e.g. `not_run -> failed`.
pub fn flakiness(history: &[HistoryEntry]) -> Option<Flakiness> {
    if history.len() < MIN_FLAKY_HISTORY {
        return None;
    }
    let sorted = chronological(history);
    let transitions = sorted
        .windows(2)
        .filter(|pair| pair[0].status != pair[1].status)
        .count() as u32;
    let rate = (transitions as f64 / (sorted.len() - 1) as f64 * 100.0).round() as u32;
    Some(Flakiness {
        transitions,
        rate,
        history_length: sorted.len(),
    })
}

/// Failed entry with the latest date. On a date tie the entry appearing last in
/// the snapshot wins.
pub fn recent_failure(history: &[HistoryEntry]) -> Option<&HistoryEntry> {
    history
        .iter()
        .filter(|e| e.status.is_failed())
        .max_by_key(|e| e.date)
}

/// Current `error.step`, else the recent failure's step, else [`UNKNOWN_STEP`].
pub fn error_step(test: &TestRecord, recent: Option<&HistoryEntry>) -> String {
    let own = test
        .error
        .as_ref()
        .and_then(|e| e.step.as_deref())
        .filter(|s| !s.is_empty());
    let from_history = recent
        .and_then(|e| e.failure_step.as_deref())
        .filter(|s| !s.is_empty());
    own.or(from_history).unwrap_or(UNKNOWN_STEP).to_string()
}

pub fn specific_failures(recent: Option<&HistoryEntry>) -> Vec<String> {
    recent
        .and_then(|e| e.failure_details.as_ref())
        .map(|d| d.failures.iter().map(|f| f.name.clone()).collect())
        .unwrap_or_default()
}

/// History-derived fields of one test, before contact enrichment.
#[derive(Debug, Clone)]
pub struct TestAnalysis<'a> {
    pub test: &'a TestRecord,
    pub arch: Arch,
    pub days_failing: u32,
    pub flakiness: Option<Flakiness>,
}

impl<'a> TestAnalysis<'a> {
    pub fn analyze(test: &'a TestRecord) -> Self {
        Self {
            test,
            arch: Arch::from_test_name(&test.name),
            days_failing: days_failing(&test.weather_history),
            flakiness: flakiness(&test.weather_history),
        }
    }

    pub fn is_flaky(&self) -> bool {
        self.flakiness.is_some_and(|f| f.is_flaky())
    }
}
