use std::time::{Duration, Instant};

/// Snapshot of reading throughput since the last `begin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingStats {
    pub elapsed: Duration,
    pub words_read: usize,
    pub effective_wpm: f64,
}

impl ReadingStats {
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Tracks wall-clock time and words consumed during one playback session.
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    started_at: Option<Instant>,
    words_at_start: usize,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, now: Instant, cursor: usize) {
        self.started_at = Some(now);
        self.words_at_start = cursor;
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Effective WPM is 0 when no time has passed, never NaN or infinite.
    pub fn sample(&self, now: Instant, cursor: usize) -> ReadingStats {
        let elapsed = self
            .started_at
            .map_or(Duration::ZERO, |start| now.saturating_duration_since(start));
        let words_read = cursor.saturating_sub(self.words_at_start);
        let seconds = elapsed.as_secs_f64();
        let effective_wpm = if seconds > 0.0 {
            words_read as f64 / seconds * 60.0
        } else {
            0.0
        };

        ReadingStats {
            elapsed,
            words_read,
            effective_wpm,
        }
    }
}
