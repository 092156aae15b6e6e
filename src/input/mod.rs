//! Text extraction collaborators.
//!
//! Each source turns a document handle into plain text. Tokenizing is left to
//! the playback controller so a failed or empty extraction never disturbs the
//! stream that is already loaded.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

pub use crate::engine::error::LoadError;

pub mod clipboard;
pub mod epub;
pub mod pdf;
pub mod text;

pub const LOADER_THREAD_NAME: &str = "swiftread-loader";

/// Plain text pulled out of some source.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub text: String,
    /// Short human-readable name (file name or "clipboard").
    pub title: String,
    /// Origin tag such as `pdf:/path/to/file.pdf`.
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Epub,
    PlainText,
}

impl DocumentFormat {
    /// Pick a format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "epub" => Ok(DocumentFormat::Epub),
            "txt" | "text" | "md" => Ok(DocumentFormat::PlainText),
            "" => Err(LoadError::UnsupportedFormat(format!(
                "{} has no file extension",
                path.display()
            ))),
            other => Err(LoadError::UnsupportedFormat(format!(".{other}"))),
        }
    }
}

/// Load any supported file by extension.
pub fn load_path(path: &Path) -> Result<LoadedDocument, LoadError> {
    match DocumentFormat::from_path(path)? {
        DocumentFormat::Pdf => pdf::load(path),
        DocumentFormat::Epub => epub::load(path),
        DocumentFormat::PlainText => text::load(path),
    }
}

pub(crate) fn ensure_exists(path: &Path) -> Result<(), LoadError> {
    if path.exists() {
        Ok(())
    } else {
        Err(LoadError::FileNotFound(path.to_path_buf()))
    }
}

pub(crate) fn title_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Where a document should come from.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadRequest {
    File(PathBuf),
    Clipboard,
}

impl LoadRequest {
    pub fn label(&self) -> String {
        match self {
            LoadRequest::File(path) => title_of(path),
            LoadRequest::Clipboard => "clipboard".to_string(),
        }
    }

    pub fn load(&self) -> Result<LoadedDocument, LoadError> {
        match self {
            LoadRequest::File(path) => load_path(path),
            LoadRequest::Clipboard => clipboard::load(),
        }
    }
}

/// A single extraction running on a worker thread.
///
/// The result arrives at most once. If the worker dies (a parser panic, for
/// instance) the load resolves to `LoadError::Interrupted`.
pub struct PendingLoad {
    label: String,
    rx: Receiver<Result<LoadedDocument, LoadError>>,
}

impl PendingLoad {
    pub fn spawn(request: LoadRequest) -> Self {
        let label = request.label();
        let (tx, rx) = mpsc::channel();

        log::info!("Loading {}", label);
        let spawned = thread::Builder::new()
            .name(LOADER_THREAD_NAME.to_string())
            .spawn(move || {
                let result = request.load();
                if let Err(err) = &result {
                    log::warn!("Load failed: {}", err);
                }
                // The receiver may already be gone if the user quit.
                let _ = tx.send(result);
            });
        if let Err(err) = spawned {
            log::error!("Could not start loader thread: {}", err);
        }

        Self { label, rx }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Non-blocking check for the result.
    pub fn try_take(&self) -> Option<Result<LoadedDocument, LoadError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(LoadError::Interrupted)),
        }
    }

    /// Block until the worker finishes.
    pub fn wait(self) -> Result<LoadedDocument, LoadError> {
        self.rx.recv().unwrap_or(Err(LoadError::Interrupted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("book.PDF")).unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("novel.epub")).unwrap(),
            DocumentFormat::Epub
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("notes.txt")).unwrap(),
            DocumentFormat::PlainText
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("README.md")).unwrap(),
            DocumentFormat::PlainText
        );
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let err = DocumentFormat::from_path(Path::new("report.docx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ref ext) if ext == ".docx"));
    }

    #[test]
    fn test_missing_extension_is_unsupported() {
        let err = DocumentFormat::from_path(Path::new("Makefile")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_unsupported_format_checked_before_existence() {
        let err = load_path(Path::new("/nonexistent/slides.pptx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_load_request_label() {
        let request = LoadRequest::File(PathBuf::from("/books/dune.epub"));
        assert_eq!(request.label(), "dune.epub");
        assert_eq!(LoadRequest::Clipboard.label(), "clipboard");
    }

    #[test]
    fn test_pending_load_delivers_text_file() {
        let mut file = Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"Loaded off the main thread.").unwrap();

        let pending = PendingLoad::spawn(LoadRequest::File(file.path().to_path_buf()));
        let doc = pending.wait().unwrap();
        assert_eq!(doc.text, "Loaded off the main thread.");
        assert!(doc.source.starts_with("txt:"));
    }

    #[test]
    fn test_pending_load_reports_failure() {
        let pending = PendingLoad::spawn(LoadRequest::File(PathBuf::from(
            "/nonexistent/missing.txt",
        )));
        assert_eq!(pending.label(), "missing.txt");
        assert!(matches!(pending.wait(), Err(LoadError::FileNotFound(_))));
    }
}
