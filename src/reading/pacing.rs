use super::token::Token;
use crate::engine::config::PacingConfig;
use std::time::Duration;

/// Milliseconds per word at `wpm`, before any pacing adjustment.
///
/// Keeps the fractional part; rounding happens once on the final delay.
pub fn wpm_to_milliseconds(wpm: u32) -> f64 {
    60_000.0 / wpm.max(1) as f64
}

/// Hold time for `token` at `wpm` under the default pacing rules.
pub fn delay_millis(token: &Token, wpm: u32) -> u64 {
    PacingPolicy::default().delay_millis(token, wpm)
}

/// Punctuation- and length-aware delay calculation.
#[derive(Debug, Clone, Default)]
pub struct PacingPolicy {
    config: PacingConfig,
}

impl PacingPolicy {
    pub fn new(config: PacingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PacingConfig {
        &self.config
    }

    pub fn delay_millis(&self, token: &Token, wpm: u32) -> u64 {
        let base = wpm_to_milliseconds(self.config.clamp(wpm));
        let delay = base
            * self.punctuation_multiplier(token.last_char())
            * self.length_multiplier(token.char_len());
        delay.round() as u64
    }

    pub fn delay(&self, token: &Token, wpm: u32) -> Duration {
        Duration::from_millis(self.delay_millis(token, wpm))
    }

    fn punctuation_multiplier(&self, last: Option<char>) -> f64 {
        match last {
            Some('.' | '!' | '?') => self.config.sentence_multiplier,
            Some(',' | ';' | ':') => self.config.clause_multiplier,
            _ => 1.0,
        }
    }

    // Stacks with the punctuation multiplier rather than replacing it.
    fn length_multiplier(&self, char_len: usize) -> f64 {
        if char_len > self.config.long_word_threshold {
            self.config.long_word_multiplier
        } else {
            1.0
        }
    }
}
