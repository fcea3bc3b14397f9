//! macro-report CLI

use anyhow::{Context, Result};
use clap::Parser;
use macro_timeseries::{
    config::PipelineConfig,
    data::MarketDataSource,
    pipeline::run_pipeline,
    report::PlotterSink,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "macro-report")]
#[command(about = "Monthly macro-financial regression report with HAC inference and diagnostics")]
#[command(version)]
struct Cli {
    /// First date of the window (default 2020-01-01)
    start_date: Option<String>,

    /// Last date of the window (default 2024-04-30)
    end_date: Option<String>,

    /// TOML file overriding the default configuration (windows, lags, HAC,
    /// transforms, provider timeout, plot output)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,

    /// Write a JSON digest of the run to this file
    #[arg(long)]
    summary_json: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stdout)
        .init();

    if let Err(err) = run(cli) {
        tracing::error!("{err:#}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => PipelineConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    let source = MarketDataSource::new(config.timeout())?;
    let mut sink = PlotterSink::new(&config.output_dir, config.plot_format);
    let report = run_pipeline(
        &config,
        cli.start_date.as_deref(),
        cli.end_date.as_deref(),
        &source,
        &mut sink,
    )?;

    if let Some(path) = cli.summary_json {
        std::fs::write(&path, serde_json::to_string_pretty(&report.to_json())?)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}
