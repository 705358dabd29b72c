mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cpu_sched_sim::{
    loader,
    report::{self, ReportOptions},
    simulate,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, OutputFormat};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version are not failures
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let records = loader::load(&cli.input)
        .with_context(|| format!("failed to load processes from {}", cli.input.display()))?;
    if records.is_empty() {
        warn!(path = %cli.input.display(), "no processes in input; metrics are undefined");
    }
    info!(processes = records.len(), "loaded processes");

    let outcomes = cli
        .policies()
        .into_iter()
        .map(|policy| {
            simulate(policy, &records).with_context(|| format!("{policy} simulation failed"))
        })
        .collect::<Result<Vec<_>>>()?;

    let options = ReportOptions {
        precision: cli.precision,
        details: cli.details,
        trace: cli.trace,
    };
    match cli.format {
        OutputFormat::Text => {
            for outcome in &outcomes {
                print!("{}", report::render_text(outcome, &options));
            }
        }
        OutputFormat::Json => {
            println!("{}", report::render_json(&outcomes, &options)?);
        }
    }
    Ok(())
}
