use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ci-health",
    version,
    about = "Daily CI health summary: pass rate, chronic failures, flaky tests and trends"
)]
pub struct Cli {
    /// Test-results snapshot (JSON)
    #[arg(long, env = "CI_HEALTH_DATA", default_value = "data.json")]
    pub data: PathBuf,

    /// Dashboard config with the maintainers directory (YAML)
    #[arg(long, env = "CI_HEALTH_CONFIG", default_value = "config.yaml")]
    pub config: PathBuf,

    /// Write the summary here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}
