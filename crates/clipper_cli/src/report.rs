use std::path::PathBuf;

use clipper_core::Outcome;
use clipper_engine::{ProgressSink, RunEvent};

/// Prints the per-URL status glyphs and save notices to stdout. One line
/// per event; diagnostics stay on stderr via the logger.
pub(crate) struct ConsoleReport {
    out: PathBuf,
}

impl ConsoleReport {
    pub(crate) fn new(out: PathBuf) -> Self {
        Self { out }
    }
}

impl ProgressSink for ConsoleReport {
    fn emit(&self, event: RunEvent) {
        match event {
            RunEvent::Resumed { prior, remaining } => {
                println!("↻ Resuming: already had {prior} items; {remaining} new to fetch.");
            }
            RunEvent::Outcome { url, outcome } => match outcome {
                Outcome::Accepted => println!("✅ {url}"),
                Outcome::Rejected(reason) => println!("🚫 {url} ({reason})"),
                Outcome::Skipped(reason) => println!("⚠️⚠️ {url} ({reason})"),
                Outcome::Failed(reason) => println!("❌ {url} ({reason})"),
            },
            RunEvent::Checkpointed { count } => {
                println!("💾 Saved {count} items to {}", self.out.display());
            }
            RunEvent::Finished { total, .. } => {
                if total > 0 {
                    println!("✅ Wrote {total} items total to {}", self.out.display());
                } else {
                    println!("⚠️⚠️ No items scraped — check URLs or increase allowances.");
                }
            }
        }
    }
}
