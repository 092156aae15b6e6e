use super::{ensure_exists, title_of, LoadError, LoadedDocument};
use std::fs;
use std::path::Path;

/// Load a plain text file. Invalid UTF-8 is replaced rather than rejected.
pub fn load(path: &Path) -> Result<LoadedDocument, LoadError> {
    ensure_exists(path)?;

    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            log::warn!(
                "{} is not valid UTF-8, replacing bad bytes",
                path.display()
            );
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };

    Ok(LoadedDocument {
        text,
        title: title_of(path),
        source: format!("txt:{}", path.display()),
    })
}
