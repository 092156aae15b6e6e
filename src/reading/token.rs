use std::fmt;

/// One displayable unit: a word with any trailing punctuation, or a lone symbol.
///
/// Tokens are never empty; `Token::new` refuses empty text.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Token {
    text: String,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Self { text })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters, not bytes.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn last_char(&self) -> Option<char> {
        self.text.chars().next_back()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}
