use super::{ensure_exists, title_of, LoadError, LoadedDocument};
use std::path::Path;

/// Elements whose content is never reading text.
const HIDDEN_ELEMENTS: [&str; 3] = ["head", "script", "style"];

/// Load text from an EPUB file using the epub crate.
///
/// Chapters are read in spine order and joined with blank lines. Markup is
/// replaced with spaces so adjacent block elements never glue words together.
pub fn load(path: &Path) -> Result<LoadedDocument, LoadError> {
    ensure_exists(path)?;

    let mut doc =
        epub::doc::EpubDoc::new(path).map_err(|e| LoadError::EpubParse(e.to_string()))?;

    let num_chapters = doc.get_num_chapters();
    if num_chapters == 0 {
        return Err(LoadError::EpubParse(
            "No chapters found in EPUB".to_string(),
        ));
    }

    let mut content = String::new();
    for chapter_idx in 0..num_chapters {
        if !doc.set_current_chapter(chapter_idx) {
            log::debug!("Skipping unreadable chapter {}", chapter_idx);
            continue;
        }

        if let Some((chapter_content, _mime)) = doc.get_current_str() {
            let plain_text = strip_markup(&chapter_content);
            if plain_text.trim().is_empty() {
                continue;
            }
            if !content.is_empty() {
                content.push_str("\n\n");
            }
            content.push_str(&plain_text);
        }
    }
    log::debug!("Read {} chapters from {}", num_chapters, path.display());

    Ok(LoadedDocument {
        text: content,
        title: title_of(path),
        source: format!("epub:{}", path.display()),
    })
}

/// Replace every tag with a single space and decode character references.
pub fn strip_markup(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;
    let mut hidden_until: Option<&str> = None;

    while let Some(open) = rest.find('<') {
        if hidden_until.is_none() {
            text.push_str(&rest[..open]);
        }
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else {
            // A lone '<' is text, not a tag.
            if hidden_until.is_none() {
                text.push_str(&rest[open..]);
            }
            rest = "";
            break;
        };

        let tag = after[..close].trim().to_ascii_lowercase();
        let is_closing = tag.starts_with('/');
        let name = tag
            .split(|c: char| c.is_whitespace() || c == '/')
            .find(|part| !part.is_empty())
            .unwrap_or("");

        match hidden_until {
            Some(element) if is_closing && name == element => hidden_until = None,
            Some(_) => {}
            None if !is_closing && !tag.ends_with('/') => {
                hidden_until = HIDDEN_ELEMENTS.iter().copied().find(|e| *e == name);
            }
            None => {}
        }

        text.push(' ');
        rest = &after[close + 1..];
    }
    if hidden_until.is_none() {
        text.push_str(rest);
    }

    decode_entities(&text)
}

/// Decode named and numeric character references. Unknown references are
/// left as written.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .find(';')
            .filter(|&end| end > 0 && end <= 10)
            .and_then(|end| decode_entity(&after[..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(|c| c == 'x' || c == 'X') {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code);
    }

    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "shy" => '\u{00AD}',
        "copy" => '\u{00A9}',
        _ => return None,
    };
    Some(c)
}
