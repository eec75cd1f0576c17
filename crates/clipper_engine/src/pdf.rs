use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("pdf text extraction failed: {0}")]
    Extraction(String),
}

/// External text-extraction collaborator for PDF bodies. The pipeline
/// treats a missing implementation as "PDF support unavailable" and skips
/// PDF URLs instead of failing them.
pub trait PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, PdfError>;
}

/// Production adapter over the `pdf-extract` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractAdapter;

impl PdfTextExtractor for PdfExtractAdapter {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, PdfError> {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|err| PdfError::Extraction(err.to_string()))
    }
}

/// Title for a PDF document: the last path segment of the URL with the
/// query stripped, or "Document" when the path has none.
pub fn pdf_title_for(url: &str) -> String {
    let path = url.split('?').next().unwrap_or(url);
    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => "Document".to_string(),
    }
}
