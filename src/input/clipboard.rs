use super::{LoadError, LoadedDocument};

/// Read the system clipboard as text.
pub fn load() -> Result<LoadedDocument, LoadError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| LoadError::Clipboard(e.to_string()))?;
    let text = clipboard
        .get_text()
        .map_err(|e| LoadError::Clipboard(e.to_string()))?;
    log::debug!("Read {} bytes from the clipboard", text.len());

    Ok(from_text(text))
}

fn from_text(text: String) -> LoadedDocument {
    LoadedDocument {
        text,
        title: "clipboard".to_string(),
        source: "clipboard".to_string(),
    }
}
