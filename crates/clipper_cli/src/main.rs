//! Command-line front end for the clipper harvest pipeline.
mod report;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use clipper_core::{parse_url_list, HarvestConfig};
use clipper_engine::{
    run_batch, HeuristicExtractor, PdfExtractAdapter, PoliteFetcher, ResultStore,
};

use crate::report::ConsoleReport;

/// Harvest clean article text from a list of URLs into a JSON corpus.
#[derive(Debug, Parser)]
#[command(name = "clipper", version, about)]
struct Args {
    /// Newline-delimited URL list; blanks and `#` comments are ignored.
    #[arg(long, default_value = "urls.txt")]
    urls: PathBuf,

    /// Output corpus; doubles as the resume checkpoint.
    #[arg(long, default_value = "blogs.json")]
    out: PathBuf,

    /// Verbose diagnostics on stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    clipper_logging::initialize(args.verbose);

    let raw = match fs::read_to_string(&args.urls) {
        Ok(raw) => raw,
        Err(err) => {
            println!("❌ {} not found", args.urls.display());
            log::debug!("url list unreadable: {err}");
            return Ok(());
        }
    };
    let urls = parse_url_list(&raw);
    if urls.is_empty() {
        println!("❌ No URLs to scrape.");
        return Ok(());
    }
    log::info!("loaded {} unique urls from {}", urls.len(), args.urls.display());

    let config = HarvestConfig::default();
    let fetcher = PoliteFetcher::new(config.clone()).context("building HTTP client")?;
    let extractor = HeuristicExtractor::default();
    let pdf = PdfExtractAdapter;
    let mut store = ResultStore::load(&args.out);
    let report = ConsoleReport::new(args.out.clone());

    let summary = run_batch(
        &urls,
        &fetcher,
        &extractor,
        Some(&pdf),
        &mut store,
        &config,
        &report,
    )
    .context("writing final checkpoint")?;

    log::info!(
        "run finished: {} accepted, {} rejected, {} skipped, {} failed",
        summary.accepted,
        summary.rejected,
        summary.skipped,
        summary.failed
    );
    Ok(())
}
