//! Texas A&M Natural Resources Job Board exporter
//!
//! Pages through the job board listing, optionally pulls each job's detail
//! page for the full description, and saves everything to an XML file.

mod fetch;
mod paginate;
mod xml;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use common::site::DEFAULT_LISTING_URL;
use common::Site;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::fetch::HttpBoard;
use crate::paginate::{scrape_all, ExportOptions};
use crate::xml::write_jobs_file;

#[derive(Debug, Parser)]
#[command(about = "Export jobs from jobs.rwfm.tamu.edu to XML")]
struct Args {
    /// PageSize to request per page
    #[arg(long, default_value_t = 100)]
    pagesize: u32,

    /// Output XML file path
    #[arg(short, long, default_value = "jobs.xml")]
    output: PathBuf,

    /// Seconds to sleep between page requests
    #[arg(long, default_value_t = 0.6)]
    sleep: f64,

    /// Limit on number of pages to fetch (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    max_pages: u32,

    /// Reduce output
    #[arg(long)]
    quiet: bool,

    /// Do not fetch individual job detail pages (faster)
    #[arg(long)]
    no_details: bool,

    /// Seconds to sleep between detail page requests
    #[arg(long, default_value_t = 0.2)]
    detail_sleep: f64,

    /// Timeout seconds for detail page requests
    #[arg(long, default_value_t = 15.0)]
    detail_timeout: f64,

    /// Listing page of the job board
    #[arg(long, env = "JOB_BOARD_URL", default_value = DEFAULT_LISTING_URL)]
    listing_url: String,
}

impl Args {
    fn export_options(&self) -> ExportOptions {
        ExportOptions {
            page_size: self.pagesize,
            page_sleep: seconds(self.sleep),
            max_pages: self.max_pages,
            fetch_details: !self.no_details,
            detail_sleep: seconds(self.detail_sleep),
        }
    }
}

/// Negative or non-finite values count as zero.
fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}

/// Log target for the end-of-run summary, which `--quiet` keeps.
const SUMMARY: &str = "exporter::summary";

fn default_filter(quiet: bool) -> String {
    if quiet {
        format!("warn,{SUMMARY}=info")
    } else {
        "info".to_string()
    }
}

fn init_logging(quiet: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(quiet))),
        )
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.quiet);

    let site = Site::from_url(&args.listing_url)
        .with_context(|| format!("Invalid listing URL: {}", args.listing_url))?;
    let board = HttpBoard::new(site.clone(), seconds(args.detail_timeout))
        .context("Failed to create HTTP client")?;

    let jobs = scrape_all(&board, &site, &args.export_options());

    info!(target: SUMMARY, "Writing {} jobs to {}...", jobs.len(), args.output.display());
    write_jobs_file(&args.output, &jobs)?;
    info!(target: SUMMARY, "Done.");

    Ok(())
}
