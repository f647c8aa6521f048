use super::args::Cli;
use crate::exit_codes::SUCCESS;
use anyhow::Context;
use ci_health_core::pipeline::summarize_files;
use ci_health_core::report::json::{write_summary, write_summary_file};

pub(crate) fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    tracing::debug!(
        data = %cli.data.display(),
        config = %cli.config.display(),
        "generating CI health summary"
    );
    let summary = summarize_files(&cli.data, &cli.config, chrono::Utc::now())
        .context("could not build health summary")?;

    match &cli.out {
        Some(path) => {
            write_summary_file(&summary, path)?;
            tracing::info!(out = %path.display(), "wrote health summary");
        }
        None => {
            let stdout = std::io::stdout();
            write_summary(&summary, &mut stdout.lock())?;
        }
    }
    Ok(SUCCESS)
}
