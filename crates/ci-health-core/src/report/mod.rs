pub mod json;
pub mod summary;

pub use summary::{build_summary, FailingTest, FlakyTest, HealthSummary};
