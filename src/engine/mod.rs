pub mod clock;
pub mod config;
pub mod error;
pub mod timer;

pub use clock::{Clock, SystemClock};
pub use config::{clamp_wpm, PacingConfig, DEFAULT_WPM, MAX_WPM, MIN_WPM, WPM_STEP};
pub use error::LoadError;
pub use timer::{DeadlineTimer, Scheduler};
