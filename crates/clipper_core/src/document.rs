use serde::{Deserialize, Serialize};

/// One accepted article: the unit persisted to the output corpus.
///
/// `title` may be empty; `content` has passed normalization, the noise
/// line filter, and the quality gate by the time a value of this type is
/// stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub url: String,
    pub title: String,
    pub content: String,
}
