//! Outcome classification: status counts, pass rate and the weather indicator.

use crate::model::{TestRecord, TestStatus};
use serde::Serialize;

/// Name of the single dashboard view covering the whole population.
pub const ALL_JOBS_SECTION: &str = "All Jobs";

/// Five-band health indicator derived from the pass rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weather {
    Sunny,
    MostlySunny,
    Cloudy,
    Rainy,
    Stormy,
}

impl Weather {
    /// Bands are inclusive on their lower bound.
    pub fn from_pass_rate(pass_rate: u32) -> Self {
        if pass_rate >= 95 {
            Self::Sunny
        } else if pass_rate >= 85 {
            Self::MostlySunny
        } else if pass_rate >= 70 {
            Self::Cloudy
        } else if pass_rate >= 50 {
            Self::Rainy
        } else {
            Self::Stormy
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Sunny => "☀️",
            Self::MostlySunny => "🌤️",
            Self::Cloudy => "⛅",
            Self::Rainy => "🌧️",
            Self::Stormy => "⛈️",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::MostlySunny => "mostly_sunny",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Stormy => "stormy",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub not_run: usize,
    pub running: usize,
}

impl OutcomeCounts {
    pub fn from_tests(tests: &[TestRecord]) -> Self {
        let mut counts = Self {
            total: tests.len(),
            ..Self::default()
        };
        for t in tests {
            match &t.status {
                TestStatus::Passed => counts.passed += 1,
                TestStatus::Failed => counts.failed += 1,
                TestStatus::Running => counts.running += 1,
                s if s.is_not_run() => counts.not_run += 1,
                _ => {}
            }
        }
        counts
    }

    /// Rounded integer percentage; 0 for an empty population.
    pub fn pass_rate(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.passed as f64 / self.total as f64 * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionSummary {
    pub name: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub not_run: usize,
    pub running: usize,
    pub pass_rate: u32,
    pub weather: String,
    pub weather_label: String,
}

impl SectionSummary {
    pub fn new(name: impl Into<String>, counts: &OutcomeCounts) -> Self {
        let pass_rate = counts.pass_rate();
        let weather = Weather::from_pass_rate(pass_rate);
        Self {
            name: name.into(),
            total: counts.total,
            passed: counts.passed,
            failed: counts.failed,
            not_run: counts.not_run,
            running: counts.running,
            pass_rate,
            weather: weather.emoji().to_string(),
            weather_label: weather.label().to_string(),
        }
    }
}
