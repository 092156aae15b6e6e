pub mod controller;
pub mod pacing;
pub mod stats;
pub mod stream;
pub mod token;
pub mod tokenizer;

pub use controller::{PlaybackController, PlaybackEvent, PlaybackState, SeekTarget};
pub use pacing::{delay_millis, wpm_to_milliseconds, PacingPolicy};
pub use stats::{ReadingStats, SessionStats};
pub use stream::{Current, WordStream};
pub use token::Token;
pub use tokenizer::{normalize_whitespace, tokenize_text};
