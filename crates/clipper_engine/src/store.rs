use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use clipper_core::ExtractedDocument;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("serialize failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ordered, URL-keyed result set persisted as one JSON array. The file is
/// both the final artifact and the resume checkpoint; entries are only
/// ever appended, never mutated or removed.
#[derive(Debug)]
pub struct ResultStore {
    path: PathBuf,
    documents: Vec<ExtractedDocument>,
    urls: HashSet<String>,
}

impl ResultStore {
    /// Opens a store at `path`, absorbing any prior checkpoint. A missing,
    /// unreadable, or malformed file is treated as an empty history, never
    /// as a fatal error.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let documents = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<ExtractedDocument>>(&raw) {
                Ok(documents) => documents,
                Err(err) => {
                    log::warn!("ignoring malformed checkpoint {}: {err}", path.display());
                    Vec::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                log::warn!("ignoring unreadable checkpoint {}: {err}", path.display());
                Vec::new()
            }
        };
        let urls = documents.iter().map(|doc| doc.url.clone()).collect();
        Self {
            path,
            documents,
            urls,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[ExtractedDocument] {
        &self.documents
    }

    /// Appends one accepted document. A URL already present is left
    /// untouched; returns whether the document was actually added.
    pub fn append(&mut self, document: ExtractedDocument) -> bool {
        if !self.urls.insert(document.url.clone()) {
            return false;
        }
        self.documents.push(document);
        true
    }

    /// Serializes the full ordered set and atomically replaces the output
    /// file: the JSON is written to a sibling temp file first, then renamed
    /// over the target, so a concurrent reader never sees a partial state.
    pub fn checkpoint(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.documents)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&self.path).map_err(|err| StoreError::Io(err.error))?;
        Ok(())
    }
}
