//! coinscope entry point.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use coinscope::{NoProgress, Orchestrator, OrchestratorConfig, Progress, Report};
use coinscope_cli::config::resolve_log_filter;
use coinscope_cli::{output, terminal, viewer};
use coinscope_cli::{Cli, CrosstermTerminal, OutputMode, RunConfig, Spinner, SystemBrowser};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match RunConfig::try_from(&cli) {
        Ok(config) => config,
        Err(e) => {
            println!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(resolve_log_filter(&config.log_level))
        .with_writer(io::stderr)
        .init();

    let orchestrator = Orchestrator::new(OrchestratorConfig::default())
        .context("failed to build HTTP client")?;

    let progress: Box<dyn Progress> = if config.show_spinner {
        Box::new(Spinner::new())
    } else {
        Box::new(NoProgress)
    };

    let report = match orchestrator.run(&config.query, progress.as_ref()).await {
        Ok(report) => report,
        Err(failure) => {
            output::write_failure(&mut io::stdout().lock(), &failure)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    match config.mode {
        OutputMode::Json => output::write_json(&mut io::stdout().lock(), &report)?,
        OutputMode::Interactive if !io::stdout().is_terminal() => {
            output::write_plain(&mut io::stdout().lock(), &report)?
        }
        OutputMode::Interactive => {
            tokio::task::spawn_blocking(move || view(&report))
                .await
                .context("viewer task failed")??;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn view(report: &Report) -> anyhow::Result<()> {
    terminal::install_panic_hook();
    let mut term = CrosstermTerminal::enter().context("failed to enter full-screen mode")?;
    viewer::run(report, &mut term, &SystemBrowser)?;
    Ok(())
}
