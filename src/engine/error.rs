use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a document could not be turned into a word stream.
///
/// `UnsupportedFormat` and `EmptyDocument` are reported as such; every other
/// variant is a failure of the extraction collaborator.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unsupported format: {0} (expected a PDF, EPUB or TXT file)")]
    UnsupportedFormat(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("PDF parse error: {0}")]
    PdfParse(String),

    #[error("EPUB parse error: {0}")]
    EpubParse(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Loading was interrupted before it produced any text")]
    Interrupted,

    #[error("No words found in {0}")]
    EmptyDocument(String),
}

impl LoadError {
    pub fn is_extraction_failure(&self) -> bool {
        !matches!(
            self,
            LoadError::UnsupportedFormat(_) | LoadError::EmptyDocument(_)
        )
    }
}
