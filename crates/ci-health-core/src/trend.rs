//! Short-term trend of failures and flakiness against a rolling baseline.
//!
//! "Today" is the most recent date present in any history, not the wall clock,
//! so a snapshot always evaluates the same way. The baseline averages the other
//! days of the window and never includes today.

use crate::history::chronological;
use crate::model::{HistoryEntry, TestRecord};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// Distinct dates considered, today included.
pub const TREND_WINDOW_DAYS: usize = 10;
/// Deltas within +/- this band are "stable".
pub const STABLE_BAND: f64 = 0.5;
/// Entries in the trailing window used for the per-day flaky judgment.
pub const DAILY_FLAKY_WINDOW: usize = 5;
const DAILY_FLAKY_THRESHOLD: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Improving,
    Regressing,
    Stable,
}

impl Trend {
    pub fn from_delta(delta: f64) -> Self {
        if delta < -STABLE_BAND {
            Self::Improving
        } else if delta > STABLE_BAND {
            Self::Regressing
        } else {
            Self::Stable
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Improving => "Improving",
            Self::Regressing => "Regressing",
            Self::Stable => "Stable",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Improving => "📉",
            Self::Regressing => "📈",
            Self::Stable => "➡️",
        }
    }
}

/// Most recent distinct history dates across all tests, newest first.
pub fn recent_dates(tests: &[TestRecord], window: usize) -> Vec<NaiveDate> {
    let all: BTreeSet<NaiveDate> = tests
        .iter()
        .flat_map(|t| t.weather_history.iter().map(|e| e.date))
        .collect();
    all.into_iter().rev().take(window).collect()
}

/// For each date, the number of tests with at least one failed entry that day.
pub fn daily_failure_counts(tests: &[TestRecord], dates: &[NaiveDate]) -> Vec<usize> {
    let index: HashMap<NaiveDate, usize> =
        dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();
    let mut counts = vec![0usize; dates.len()];
    let mut seen = vec![false; dates.len()];
    for test in tests {
        seen.iter_mut().for_each(|s| *s = false);
        for entry in test.weather_history.iter().filter(|e| e.status.is_failed()) {
            if let Some(&i) = index.get(&entry.date) {
                if !seen[i] {
                    seen[i] = true;
                    counts[i] += 1;
                }
            }
        }
    }
    counts
}

/// Flaky judgment of one test as of `date`, from the last five entries up to
/// and including that date. Does not consult [`crate::history::flakiness`].
fn flaky_as_of(sorted: &[&HistoryEntry], date: NaiveDate) -> bool {
    let end = sorted.partition_point(|e| e.date <= date);
    if end < DAILY_FLAKY_WINDOW {
        return false;
    }
    let window = &sorted[end - DAILY_FLAKY_WINDOW..end];
    let transitions = window
        .windows(2)
        .filter(|pair| pair[0].status != pair[1].status)
        .count();
    let rate = (transitions as f64 / (DAILY_FLAKY_WINDOW - 1) as f64 * 100.0).round() as u32;
    rate > DAILY_FLAKY_THRESHOLD
}

/// For each date, the number of tests judged flaky on that date.
pub fn daily_flaky_counts(tests: &[TestRecord], dates: &[NaiveDate]) -> Vec<usize> {
    let mut counts = vec![0usize; dates.len()];
    for test in tests {
        if test.weather_history.len() < DAILY_FLAKY_WINDOW {
            continue;
        }
        let sorted = chronological(&test.weather_history);
        for (i, date) in dates.iter().enumerate() {
            if flaky_as_of(&sorted, *date) {
                counts[i] += 1;
            }
        }
    }
    counts
}

/// Mean rounded to one decimal; 0.0 with no days.
pub fn rolling_average(counts: &[usize]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
    (mean * 10.0).round() / 10.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendReport {
    /// Newest first; `dates[0]` is today.
    pub dates: Vec<NaiveDate>,
    pub daily_failed: Vec<usize>,
    pub daily_flaky: Vec<usize>,
    pub ten_day_avg_failed: f64,
    pub ten_day_avg_flaky: f64,
    pub failed_delta: f64,
    pub flaky_delta: f64,
    pub trend: Trend,
}

impl TrendReport {
    /// Compare today's counts to the baseline of the preceding window days.
    pub fn compute(tests: &[TestRecord], failed_count: usize, flaky_count: usize) -> Self {
        let dates = recent_dates(tests, TREND_WINDOW_DAYS);
        let daily_failed = daily_failure_counts(tests, &dates);
        let daily_flaky = daily_flaky_counts(tests, &dates);

        let baseline = |counts: &[usize]| rolling_average(counts.get(1..).unwrap_or(&[]));
        let ten_day_avg_failed = baseline(&daily_failed);
        let ten_day_avg_flaky = baseline(&daily_flaky);
        let failed_delta = failed_count as f64 - ten_day_avg_failed;
        let flaky_delta = flaky_count as f64 - ten_day_avg_flaky;

        tracing::debug!(
            days = dates.len(),
            ten_day_avg_failed,
            ten_day_avg_flaky,
            failed_delta,
            "computed trend baseline"
        );

        Self {
            dates,
            daily_failed,
            daily_flaky,
            ten_day_avg_failed,
            ten_day_avg_flaky,
            failed_delta,
            flaky_delta,
            trend: Trend::from_delta(failed_delta),
        }
    }
}
