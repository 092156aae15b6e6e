use super::token::Token;

/// What the cursor currently points at.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Current<'a> {
    Token(&'a Token),
    /// Cursor has moved past the last token.
    Finished,
    /// No tokens loaded.
    Empty,
}

impl<'a> Current<'a> {
    pub fn token(self) -> Option<&'a Token> {
        match self {
            Current::Token(token) => Some(token),
            Current::Finished | Current::Empty => None,
        }
    }
}

/// Ordered tokens plus a cursor in `0..=len`; `cursor == len` means finished.
#[derive(Debug, Default, Clone)]
pub struct WordStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl WordStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, cursor: 0 }
    }

    /// Replace the token sequence and rewind.
    pub fn load(&mut self, tokens: Vec<Token>) {
        self.tokens = tokens;
        self.cursor = 0;
    }

    pub fn clear(&mut self) {
        self.load(Vec::new());
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// An empty stream counts as finished.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    pub fn current(&self) -> Current<'_> {
        if self.tokens.is_empty() {
            Current::Empty
        } else {
            self.tokens
                .get(self.cursor)
                .map_or(Current::Finished, Current::Token)
        }
    }

    /// Step forward once unless already finished. Returns whether the stream is now finished.
    pub fn advance(&mut self) -> bool {
        if !self.is_finished() {
            self.cursor += 1;
        }
        self.is_finished()
    }

    /// Step back once if possible. Returns whether the cursor moved.
    pub fn retreat(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward without ever entering the finished state.
    pub fn step_forward(&mut self) -> bool {
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Step back, also usable from the finished state.
    pub fn step_back(&mut self) -> bool {
        if self.is_empty() || self.cursor == 0 {
            return false;
        }
        self.cursor = self.cursor.min(self.tokens.len()) - 1;
        true
    }

    /// Jump to `floor(fraction * (len - 1))`. Out-of-range or NaN fractions are clamped.
    pub fn seek_to(&mut self, fraction: f64) {
        if self.tokens.is_empty() {
            return;
        }
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let last = self.tokens.len() - 1;
        self.cursor = ((fraction * last as f64).floor() as usize).min(last);
    }

    /// Jump to an absolute index, clamped to the last token.
    pub fn seek_to_index(&mut self, index: usize) {
        if self.tokens.is_empty() {
            return;
        }
        self.cursor = index.min(self.tokens.len() - 1);
    }

    /// `cursor / (len - 1)`, or 0 for streams of one token or fewer.
    pub fn progress_fraction(&self) -> f64 {
        if self.tokens.len() <= 1 {
            return 0.0;
        }
        self.cursor as f64 / (self.tokens.len() - 1) as f64
    }

    /// Whole minutes at `wpm`, rounded up and reported in seconds.
    pub fn estimated_total_seconds(&self, wpm: u32) -> f64 {
        let minutes = (self.tokens.len() as f64 / wpm.max(1) as f64).ceil();
        minutes * 60.0
    }
}
