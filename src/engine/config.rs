// Configuration for the swiftread reading engine.
// Defaults mirror the pacing rules of the reader; nothing here is persisted.

use std::ops::RangeInclusive;

/// Slowest accepted reading rate.
pub const MIN_WPM: u32 = 50;

/// Fastest accepted reading rate.
pub const MAX_WPM: u32 = 1000;

/// Rate used when nothing else has been chosen.
pub const DEFAULT_WPM: u32 = 300;

/// Step applied by the `+` / `-` keys.
pub const WPM_STEP: i32 = 25;

/// Clamp any requested rate into the supported range.
///
/// Accepts signed input so that adjustments like `wpm - 25` never wrap.
pub fn clamp_wpm(wpm: i64) -> u32 {
    wpm.clamp(MIN_WPM as i64, MAX_WPM as i64) as u32
}

/// Pacing configuration used by `PacingPolicy`.
#[derive(Debug, Clone, PartialEq)]
pub struct PacingConfig {
    /// Minimum and maximum allowed WPM
    pub wpm_range: RangeInclusive<u32>,

    /// Applied when a token ends with `.`, `!` or `?` (default 1.5x)
    pub sentence_multiplier: f64,

    /// Applied when a token ends with `,`, `;` or `:` (default 1.2x)
    pub clause_multiplier: f64,

    /// Tokens longer than this many characters get the long-word bonus (default 8)
    pub long_word_threshold: usize,

    /// Long-word bonus, stacked on top of any punctuation multiplier (default 1.1x)
    pub long_word_multiplier: f64,
}

impl PacingConfig {
    pub fn clamp(&self, wpm: u32) -> u32 {
        wpm.clamp(*self.wpm_range.start(), *self.wpm_range.end())
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            wpm_range: MIN_WPM..=MAX_WPM,
            sentence_multiplier: 1.5,
            clause_multiplier: 1.2,
            long_word_threshold: 8,
            long_word_multiplier: 1.1,
        }
    }
}
