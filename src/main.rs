//! CLI entry point for the OCW downloader.

use anyhow::{Context, Result};
use clap::Parser;
use ocw_core::{CourseOrchestrator, rename_lectures};
use tracing::{debug, info, warn};

mod app_config;
mod cli;

use cli::{Cli, Command, FetchArgs, RenameArgs};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?cli, "CLI arguments parsed");

    match cli.command {
        Command::Fetch(args) => run_fetch(&args).await,
        Command::Rename(args) => run_rename(&args),
    }
}

async fn run_fetch(args: &FetchArgs) -> Result<()> {
    let config = app_config::resolve_config(args)?;
    info!(
        courses = config.courses.len(),
        sections = config.sections.len(),
        output_dir = %config.output_dir.display(),
        "OCW downloader starting"
    );

    let orchestrator = CourseOrchestrator::new(config).context("building HTTP client")?;
    let report = orchestrator
        .run()
        .await
        .context("invalid course identifier in configuration")?;

    for course in &report.courses {
        for section in course.sections.iter().filter(|s| !s.found()) {
            warn!(course = %course.slug, section = %section.name, "no PDFs found for section");
        }
    }

    info!(
        saved = report.saved(),
        skipped = report.skipped(),
        failed = report.failed(),
        sections_not_found = report.sections_not_found(),
        "Download complete"
    );
    Ok(())
}

fn run_rename(args: &RenameArgs) -> Result<()> {
    let report = rename_lectures(&args.dir, &args.prefix, args.dry_run)?;
    info!(
        renamed = report.renamed.len(),
        skipped_existing = report.skipped_existing.len(),
        ignored = report.ignored.len(),
        dry_run = args.dry_run,
        "Rename complete"
    );
    Ok(())
}
