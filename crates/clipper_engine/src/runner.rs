use std::ops::RangeInclusive;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

use rand::Rng;

use clipper_core::{
    host_of, ExtractedDocument, FailReason, HarvestConfig, Outcome, QualityGate, RejectReason,
    SkipReason,
};

use crate::decode::decode_body;
use crate::extract::{normalize_text, Extraction, Extractor};
use crate::fetch::{is_pdf_response, FetchError, FetchErrorKind, Fetcher};
use crate::pdf::{pdf_title_for, PdfTextExtractor};
use crate::store::{ResultStore, StoreError};

/// Observable run milestones, emitted in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// A prior checkpoint was absorbed before fetching started.
    Resumed { prior: usize, remaining: usize },
    /// One URL reached a terminal state.
    Outcome { url: String, outcome: Outcome },
    /// A periodic checkpoint was written (the final save is implied by
    /// `Finished` and not announced separately).
    Checkpointed { count: usize },
    /// The work list is exhausted and the final checkpoint is on disk.
    Finished { accepted: usize, total: usize },
}

/// Receives run milestones; the CLI prints them, tests collect them.
pub trait ProgressSink {
    fn emit(&self, event: RunEvent);
}

/// Totals for one completed run (this session only, resume excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub skipped: usize,
    pub failed: usize,
}

enum UrlResult {
    Accept(ExtractedDocument),
    Reject(RejectReason),
    Skip(SkipReason),
    Fail(FailReason),
}

/// Drives the per-URL loop: fetch, classify, extract, gate, accumulate,
/// checkpoint. Strictly serial; no outcome aborts the run. The store is
/// owned exclusively by this function for the duration of the run.
///
/// Periodic checkpoint failures are logged and the run continues; only a
/// failing *final* checkpoint is surfaced to the caller.
pub fn run_batch(
    urls: &[String],
    fetcher: &dyn Fetcher,
    extractor: &dyn Extractor,
    pdf: Option<&dyn PdfTextExtractor>,
    store: &mut ResultStore,
    config: &HarvestConfig,
    sink: &dyn ProgressSink,
) -> Result<RunSummary, StoreError> {
    let prior = store.len();
    let work: Vec<&String> = urls.iter().filter(|url| !store.contains(url)).collect();
    if prior > 0 {
        sink.emit(RunEvent::Resumed {
            prior,
            remaining: work.len(),
        });
    }

    let gate = QualityGate::new(config.min_words);
    let mut summary = RunSummary::default();

    for url in work {
        // The per-URL boundary: even an unclassified panic inside fetch or
        // extraction downgrades to a Failed outcome for this URL alone.
        let result = catch_unwind(AssertUnwindSafe(|| {
            process_url(url, fetcher, extractor, pdf, config, &gate)
        }))
        .unwrap_or_else(|panic| UrlResult::Fail(FailReason::Unexpected(describe_panic(&panic))));

        let outcome = match result {
            UrlResult::Accept(document) => {
                store.append(document);
                summary.accepted += 1;
                if config.save_every > 0 && summary.accepted % config.save_every == 0 {
                    match store.checkpoint() {
                        Ok(()) => sink.emit(RunEvent::Checkpointed { count: store.len() }),
                        Err(err) => log::error!("checkpoint failed, continuing: {err}"),
                    }
                }
                Outcome::Accepted
            }
            UrlResult::Reject(reason) => {
                summary.rejected += 1;
                Outcome::Rejected(reason)
            }
            UrlResult::Skip(reason) => {
                summary.skipped += 1;
                Outcome::Skipped(reason)
            }
            UrlResult::Fail(reason) => {
                summary.failed += 1;
                Outcome::Failed(reason)
            }
        };
        sink.emit(RunEvent::Outcome {
            url: url.to_string(),
            outcome,
        });
    }

    // Unconditional final checkpoint, whether or not the cadence just hit.
    store.checkpoint()?;
    sink.emit(RunEvent::Finished {
        accepted: summary.accepted,
        total: store.len(),
    });
    Ok(summary)
}

fn process_url(
    url: &str,
    fetcher: &dyn Fetcher,
    extractor: &dyn Extractor,
    pdf: Option<&dyn PdfTextExtractor>,
    config: &HarvestConfig,
    gate: &QualityGate,
) -> UrlResult {
    let js_gated = config.is_js_gated(&host_of(url));

    let mut result = fetcher.fetch(url);

    // Second chance: one manual retry with a fresh identity after a longer
    // delay, for 403/429 only. Layered here, outside the fetcher's own
    // retry loop.
    if let Err(error) = &result {
        if let FetchErrorKind::HttpStatus(status) = error.kind {
            if config.second_chance.applies_to(status) {
                sleep_uniform_secs(&config.second_chance.delay_range);
                result = fetcher.fetch(url);
            }
        }
    }

    let success = match result {
        Ok(success) => success,
        Err(error) => return classify_fetch_error(error, js_gated),
    };

    if is_pdf_response(success.content_type.as_deref(), url) {
        let Some(pdf) = pdf else {
            return UrlResult::Skip(SkipReason::PdfUnsupported);
        };
        let text = match pdf.extract_text(&success.bytes) {
            Ok(text) => text,
            Err(err) => {
                // Empty content falls through to the quality gate below.
                log::warn!("pdf extraction failed for {url}: {err}");
                String::new()
            }
        };
        let content = normalize_text(&text);
        if !gate.accept(&content) {
            return UrlResult::Reject(RejectReason::PdfTooShort);
        }
        return UrlResult::Accept(ExtractedDocument {
            url: url.to_string(),
            title: pdf_title_for(url),
            content,
        });
    }

    let decoded = decode_body(&success.bytes, success.content_type.as_deref());
    let Extraction { title, content } = extractor.extract(&decoded.text);
    if !gate.accept(&content) {
        return UrlResult::Reject(RejectReason::HtmlTooShort);
    }
    UrlResult::Accept(ExtractedDocument {
        url: url.to_string(),
        title,
        content,
    })
}

fn classify_fetch_error(error: FetchError, js_gated: bool) -> UrlResult {
    match error.kind {
        FetchErrorKind::HttpStatus(status @ (401 | 403 | 406)) => {
            UrlResult::Skip(SkipReason::Forbidden { status, js_gated })
        }
        FetchErrorKind::HttpStatus(status) => UrlResult::Fail(FailReason::HttpStatus(status)),
        FetchErrorKind::Timeout | FetchErrorKind::Network => UrlResult::Fail(FailReason::Network {
            js_gated,
            message: error.message,
        }),
        FetchErrorKind::InvalidUrl | FetchErrorKind::TooLarge { .. } => {
            UrlResult::Fail(FailReason::Unexpected(error.to_string()))
        }
    }
}

fn describe_panic(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic during processing".to_string()
    }
}

fn sleep_uniform_secs(range: &RangeInclusive<f64>) {
    let (low, high) = (*range.start(), *range.end());
    if high <= 0.0 {
        return;
    }
    let secs = rand::rng().random_range(low.min(high)..=high);
    std::thread::sleep(Duration::from_secs_f64(secs));
}
