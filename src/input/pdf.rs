use super::{ensure_exists, title_of, LoadError, LoadedDocument};
use std::fs;
use std::path::Path;

/// Load text from a PDF file using pdf-extract.
pub fn load(path: &Path) -> Result<LoadedDocument, LoadError> {
    ensure_exists(path)?;

    let buffer = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let text = pdf_extract::extract_text_from_mem(&buffer)
        .map_err(|e| LoadError::PdfParse(e.to_string()))?;
    log::debug!("Extracted {} bytes of text from {}", text.len(), path.display());

    Ok(LoadedDocument {
        text,
        title: title_of(path),
        source: format!("pdf:{}", path.display()),
    })
}
