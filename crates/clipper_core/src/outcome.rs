use std::fmt;

/// Terminal classification of one URL. Exactly one outcome is reported
/// per URL and none of them stops the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Document extracted, gated, and stored.
    Accepted,
    /// Extracted, but the content fell below the quality floor.
    Rejected(RejectReason),
    /// Deliberately not harvested.
    Skipped(SkipReason),
    /// Fetch or processing failed after all retries.
    Failed(FailReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    HtmlTooShort,
    PdfTooShort,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::HtmlTooShort => write!(f, "too little content after cleaning"),
            RejectReason::PdfTooShort => write!(f, "PDF text too short after extraction"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// 401/403/406 after the second-chance retry. `js_gated` softens the
    /// wording only; handling is identical.
    Forbidden { status: u16, js_gated: bool },
    /// No PDF text extractor was wired in at startup.
    PdfUnsupported,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Forbidden {
                status,
                js_gated: true,
            } => write!(f, "status {status}, likely JS/cookie-gated — skipped"),
            SkipReason::Forbidden {
                status,
                js_gated: false,
            } => write!(f, "status {status}, forbidden — skipped"),
            SkipReason::PdfUnsupported => {
                write!(f, "PDF — text extraction support unavailable")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailReason {
    HttpStatus(u16),
    Network { js_gated: bool, message: String },
    Unexpected(String),
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailReason::HttpStatus(status) => write!(f, "status {status}"),
            FailReason::Network {
                js_gated: true,
                message,
            } => write!(f, "network; likely JS/cookie-gated -> {message}"),
            FailReason::Network {
                js_gated: false,
                message,
            } => write!(f, "network error -> {message}"),
            FailReason::Unexpected(message) => write!(f, "unexpected error -> {message}"),
        }
    }
}
