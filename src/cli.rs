//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use ocw_core::rename::DEFAULT_PREFIX;

/// Discover and download lecture notes and assignment PDFs from MIT OpenCourseWare.
#[derive(Parser, Debug)]
#[command(name = "ocw-downloader")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find and download PDFs for the configured courses and sections
    Fetch(FetchArgs),
    /// Rename `*_lecN.D.pdf` files to `<prefix> - Lecture N.D.pdf`
    Rename(RenameArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct FetchArgs {
    /// Course slugs or course URLs (replaces the configured course list)
    pub courses: Vec<String>,

    /// Path to a JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Only process these sections (repeatable)
    #[arg(short = 's', long = "section")]
    pub sections: Vec<String>,

    /// Root directory for downloads
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Site root course URLs are built under
    #[arg(long)]
    pub base_url: Option<String>,

    /// Page request timeout in seconds (1-3600)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub page_timeout: Option<u64>,

    /// File request timeout in seconds (1-3600)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub file_timeout: Option<u64>,

    /// Accept `.PDF` and other casings in direct link scans
    #[arg(long)]
    pub ignore_case_suffix: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RenameArgs {
    /// Directory holding the PDFs
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Text placed before " - Lecture N.D.pdf"
    #[arg(short, long, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Report what would be renamed without touching any file
    #[arg(long)]
    pub dry_run: bool,
}
