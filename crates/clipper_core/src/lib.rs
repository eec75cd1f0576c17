//! Clipper core: pure domain types and policies, no I/O.
mod config;
mod document;
mod gate;
mod outcome;
mod worklist;

pub use config::{HarvestConfig, RetryPolicy, SecondChancePolicy};
pub use document::ExtractedDocument;
pub use gate::{word_count, QualityGate};
pub use outcome::{FailReason, Outcome, RejectReason, SkipReason};
pub use worklist::{host_of, parse_url_list};
