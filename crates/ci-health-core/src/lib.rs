pub mod arch;
pub mod classify;
pub mod config;
pub mod contacts;
pub mod errors;
pub mod history;
pub mod input;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod trend;

pub use errors::HealthError;
pub use report::HealthSummary;
