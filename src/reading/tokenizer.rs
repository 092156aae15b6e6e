//! Splits normalized text into display tokens.
//!
//! A token is a maximal run of word graphemes (letters and digits in any
//! script, `_`, apostrophes) plus any trailing `. , ! ? ; :`. Every other
//! non-whitespace grapheme stands alone. Whitespace only separates.

use super::token::Token;
use unicode_segmentation::UnicodeSegmentation;

const TRAILING_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ';', ':'];

/// Collapse every run of whitespace (line breaks included) to one space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    words(text).collect::<Vec<_>>().join(" ")
}

/// Tokenize raw document text. Pure and deterministic; empty input gives no tokens.
pub fn tokenize_text(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for chunk in words(text) {
        split_chunk(chunk, &mut tokens);
    }
    tokens
}

// U+FEFF is not White_Space in Unicode but browsers and editors treat it as such.
fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || c == '\u{feff}')
        .filter(|chunk| !chunk.is_empty())
}

fn split_chunk(chunk: &str, tokens: &mut Vec<Token>) {
    let mut graphemes = chunk.grapheme_indices(true).peekable();

    while let Some((start, grapheme)) = graphemes.next() {
        if !is_word_grapheme(grapheme) {
            tokens.extend(Token::new(grapheme));
            continue;
        }

        let mut end = start + grapheme.len();
        while let Some(&(idx, next)) = graphemes.peek() {
            if !is_word_grapheme(next) {
                break;
            }
            end = idx + next.len();
            graphemes.next();
        }
        while let Some(&(idx, next)) = graphemes.peek() {
            if !is_trailing_punctuation(next) {
                break;
            }
            end = idx + next.len();
            graphemes.next();
        }

        tokens.extend(Token::new(&chunk[start..end]));
    }
}

fn is_word_grapheme(grapheme: &str) -> bool {
    grapheme
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_' || is_apostrophe(c))
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

fn is_trailing_punctuation(grapheme: &str) -> bool {
    let mut chars = grapheme.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if TRAILING_PUNCTUATION.contains(&c)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(Token::as_str).collect()
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize_text("").is_empty());
    }

    #[test]
    fn test_tokenize_whitespace_only() {
        assert!(tokenize_text("  \n\r\n\t ").is_empty());
    }

    #[test]
    fn test_tokenize_keeps_trailing_punctuation() {
        let tokens = tokenize_text("Hello, world!");
        assert_eq!(tokens, ["Hello,", "world!"]);
    }

    #[test]
    fn test_tokenize_collapses_line_breaks() {
        let tokens = tokenize_text("first line\r\nsecond\n\n\nthird");
        assert_eq!(texts(&tokens), vec!["first", "line", "second", "third"]);
    }

    #[test]
    fn test_tokenize_stacked_punctuation() {
        let tokens = tokenize_text("wait... really?! yes;");
        assert_eq!(texts(&tokens), vec!["wait...", "really?!", "yes;"]);
    }

    #[test]
    fn test_tokenize_apostrophes_stay_in_word() {
        let tokens = tokenize_text("don't can\u{2019}t 'quoted'");
        assert_eq!(texts(&tokens), vec!["don't", "can\u{2019}t", "'quoted'"]);
    }

    #[test]
    fn test_tokenize_stray_symbols_stand_alone() {
        let tokens = tokenize_text("cats & dogs (mostly)");
        assert_eq!(
            texts(&tokens),
            vec!["cats", "&", "dogs", "(", "mostly", ")"]
        );
    }

    #[test]
    fn test_tokenize_symbol_inside_word_splits_it() {
        let tokens = tokenize_text("well-known \"quote\"");
        assert_eq!(
            texts(&tokens),
            vec!["well", "-", "known", "\"", "quote", "\""]
        );
    }

    #[test]
    fn test_tokenize_leading_punctuation_is_separate() {
        let tokens = tokenize_text("...and then");
        assert_eq!(texts(&tokens), vec![".", ".", ".", "and", "then"]);
    }

    #[test]
    fn test_tokenize_abbreviation_splits_after_each_period() {
        let tokens = tokenize_text("e.g. 3.14");
        assert_eq!(texts(&tokens), vec!["e.", "g.", "3.", "14"]);
    }

    #[test]
    fn test_tokenize_non_ascii_letters() {
        let tokens = tokenize_text("Café naïve Ελληνικά русский 日本語です。");
        assert_eq!(
            texts(&tokens),
            vec!["Café", "naïve", "Ελληνικά", "русский", "日本語です", "。"]
        );
    }

    #[test]
    fn test_tokenize_combining_marks_stay_in_word() {
        // "e" followed by U+0301 COMBINING ACUTE ACCENT
        let tokens = tokenize_text("cafe\u{301} ole\u{301}!");
        assert_eq!(texts(&tokens), vec!["cafe\u{301}", "ole\u{301}!"]);
    }

    #[test]
    fn test_tokenize_digits_and_underscore() {
        let tokens = tokenize_text("room_42 has 7 chairs.");
        assert_eq!(texts(&tokens), vec!["room_42", "has", "7", "chairs."]);
    }

    #[test]
    fn test_tokenize_byte_order_mark_is_whitespace() {
        let tokens = tokenize_text("\u{feff}Hello world");
        assert_eq!(texts(&tokens), vec!["Hello", "world"]);
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let text = "Same input, same output. Always!";
        assert_eq!(tokenize_text(text), tokenize_text(text));
    }

    #[test]
    fn test_tokens_rejoin_to_normalized_text() {
        let text = "  The quick,\n brown fox!  ";
        let joined = texts(&tokenize_text(text)).join(" ");
        assert_eq!(joined, normalize_whitespace(text));
        assert_eq!(joined, "The quick, brown fox!");
    }
}
