//! Clipper engine: fetch, extraction, and persistence pipeline.
mod decode;
mod extract;
mod fetch;
mod identity;
mod pdf;
mod runner;
mod store;

pub use decode::{decode_body, DecodedBody};
pub use extract::{
    normalize_text, Extraction, Extractor, ExtractorSettings, HeuristicExtractor,
};
pub use fetch::{
    is_pdf_response, FetchError, FetchErrorKind, FetchSuccess, Fetcher, PoliteFetcher,
};
pub use identity::{Identity, IdentityPool};
pub use pdf::{pdf_title_for, PdfError, PdfExtractAdapter, PdfTextExtractor};
pub use runner::{run_batch, ProgressSink, RunEvent, RunSummary};
pub use store::{ResultStore, StoreError};
