//! Playback state machine.
//!
//! The controller owns the word stream, the one-shot timer and the session
//! statistics. Every command returns the notifications the presentation layer
//! should render; nothing here touches a display.
//!
//! At most one timer is ever pending: every path that schedules goes through
//! `arm`, which cancels first, and `tick` consumes the fired timer before it
//! does anything else.

use super::pacing::PacingPolicy;
use super::stats::{ReadingStats, SessionStats};
use super::stream::{Current, WordStream};
use super::token::Token;
use super::tokenizer::tokenize_text;
use crate::engine::clock::{Clock, SystemClock};
use crate::engine::error::LoadError;
use crate::engine::timer::{DeadlineTimer, Scheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing loaded, or the stream ran to the end.
    Idle,
    /// Stream loaded with a valid cursor, timer stopped.
    Paused,
    /// Timer running.
    Playing,
}

/// Notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    TokenChanged {
        token: Token,
        index: usize,
        total: usize,
    },
    /// Nothing to display (no stream loaded).
    Cleared,
    Finished,
    StatsUpdated(ReadingStats),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekTarget {
    /// Position in `0.0..=1.0` of the stream.
    Fraction(f64),
    /// Absolute token index.
    Index(usize),
}

pub struct PlaybackController<S = DeadlineTimer, C = SystemClock> {
    stream: WordStream,
    state: PlaybackState,
    base_rate: u32,
    pacing: PacingPolicy,
    stats: SessionStats,
    scheduler: S,
    clock: C,
}

impl PlaybackController<DeadlineTimer, SystemClock> {
    pub fn new(base_rate: u32) -> Self {
        Self::with_parts(
            base_rate,
            PacingPolicy::default(),
            DeadlineTimer::new(),
            SystemClock,
        )
    }
}

impl<S: Scheduler, C: Clock> PlaybackController<S, C> {
    pub fn with_parts(base_rate: u32, pacing: PacingPolicy, scheduler: S, clock: C) -> Self {
        let base_rate = pacing.config().clamp(base_rate);
        Self {
            stream: WordStream::default(),
            state: PlaybackState::Idle,
            base_rate,
            pacing,
            stats: SessionStats::new(),
            scheduler,
            clock,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn stream(&self) -> &WordStream {
        &self.stream
    }

    pub fn base_rate(&self) -> u32 {
        self.base_rate
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Statistics since the last fresh start, or `None` if playback never started.
    pub fn sample_stats(&self) -> Option<ReadingStats> {
        self.stats
            .is_started()
            .then(|| self.stats.sample(self.clock.now(), self.stream.cursor()))
    }

    /// Tokenize `text` and load it. An empty result leaves the current stream untouched.
    pub fn load_text(&mut self, text: &str, source: &str) -> Result<Vec<PlaybackEvent>, LoadError> {
        let tokens = tokenize_text(text);
        if tokens.is_empty() {
            return Err(LoadError::EmptyDocument(source.to_string()));
        }
        log::info!("Loaded {} tokens from {}", tokens.len(), source);
        Ok(self.load_tokens(tokens))
    }

    /// Replace the stream and stop at its first token.
    pub fn load_tokens(&mut self, tokens: Vec<Token>) -> Vec<PlaybackEvent> {
        self.scheduler.cancel();
        self.stream.load(tokens);
        self.stats = SessionStats::new();
        self.state = if self.stream.is_empty() {
            PlaybackState::Idle
        } else {
            PlaybackState::Paused
        };
        vec![self.display_event()]
    }

    pub fn start(&mut self) -> Vec<PlaybackEvent> {
        if self.stream.is_finished() {
            return Vec::new();
        }
        if self.state != PlaybackState::Playing {
            self.stats.begin(self.clock.now(), self.stream.cursor());
            self.state = PlaybackState::Playing;
            log::info!(
                "Playback started at word {} of {} ({} wpm)",
                self.stream.cursor() + 1,
                self.stream.len(),
                self.base_rate
            );
        }
        self.resume()
    }

    pub fn pause(&mut self) -> Vec<PlaybackEvent> {
        self.scheduler.cancel();
        if self.state != PlaybackState::Playing {
            return Vec::new();
        }
        self.state = PlaybackState::Paused;
        log::info!("Playback paused at word {}", self.stream.cursor() + 1);
        vec![PlaybackEvent::StatsUpdated(self.sample_now())]
    }

    pub fn toggle(&mut self) -> Vec<PlaybackEvent> {
        if self.is_playing() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Back to the first token, paused, from any state.
    pub fn reset(&mut self) -> Vec<PlaybackEvent> {
        self.scheduler.cancel();
        self.stream.seek_to_index(0);
        self.state = if self.stream.is_empty() {
            PlaybackState::Idle
        } else {
            PlaybackState::Paused
        };
        vec![self.display_event()]
    }

    /// Move the cursor. While playing, the timer restarts from the new token.
    pub fn seek(&mut self, target: SeekTarget) -> Vec<PlaybackEvent> {
        if self.stream.is_empty() {
            return Vec::new();
        }
        let was_playing = self.is_playing();
        if was_playing {
            self.pause();
        }

        match target {
            SeekTarget::Fraction(fraction) => self.stream.seek_to(fraction),
            SeekTarget::Index(index) => self.stream.seek_to_index(index),
        }
        log::debug!("Seek to word {}", self.stream.cursor() + 1);

        if was_playing {
            self.start()
        } else {
            self.state = PlaybackState::Paused;
            vec![self.display_event()]
        }
    }

    /// Set a new base rate (clamped). Keeps the cursor; a running timer is re-armed.
    pub fn change_rate(&mut self, wpm: i64) -> Vec<PlaybackEvent> {
        let range = &self.pacing.config().wpm_range;
        let rate = wpm.clamp(*range.start() as i64, *range.end() as i64) as u32;
        if rate != self.base_rate {
            log::info!("Rate changed {} -> {} wpm", self.base_rate, rate);
        }
        self.base_rate = rate;

        if self.is_playing() {
            self.resume()
        } else {
            Vec::new()
        }
    }

    pub fn step_forward(&mut self) -> Vec<PlaybackEvent> {
        if !self.stream.step_forward() {
            return Vec::new();
        }
        self.after_step()
    }

    pub fn step_back(&mut self) -> Vec<PlaybackEvent> {
        if !self.stream.step_back() {
            return Vec::new();
        }
        self.after_step()
    }

    /// Drop the document entirely.
    pub fn close(&mut self) -> Vec<PlaybackEvent> {
        self.scheduler.cancel();
        self.stream.clear();
        self.stats = SessionStats::new();
        self.state = PlaybackState::Idle;
        vec![PlaybackEvent::Cleared]
    }

    /// Called by the host when the scheduled delay has elapsed.
    pub fn tick(&mut self) -> Vec<PlaybackEvent> {
        // The one-shot timer has fired; forget it before anything can bail out.
        self.scheduler.cancel();
        if self.state != PlaybackState::Playing {
            log::debug!("Ignoring tick while {:?}", self.state);
            return Vec::new();
        }

        if self.stream.advance() {
            self.state = PlaybackState::Idle;
            let stats = self.sample_now();
            log::info!(
                "Finished {} words in {:.1}s ({:.0} effective wpm)",
                stats.words_read,
                stats.elapsed_seconds(),
                stats.effective_wpm
            );
            return vec![PlaybackEvent::StatsUpdated(stats), PlaybackEvent::Finished];
        }

        self.resume()
    }

    fn after_step(&mut self) -> Vec<PlaybackEvent> {
        if self.is_playing() {
            self.resume()
        } else {
            self.state = PlaybackState::Paused;
            vec![self.display_event()]
        }
    }

    // Show the current token and schedule the next tick from its delay.
    fn resume(&mut self) -> Vec<PlaybackEvent> {
        let event = self.display_event();
        self.arm();
        vec![event]
    }

    fn arm(&mut self) {
        self.scheduler.cancel();
        if let Current::Token(token) = self.stream.current() {
            let delay = self.pacing.delay(token, self.base_rate);
            log::debug!("Next tick in {}ms for {:?}", delay.as_millis(), token.as_str());
            self.scheduler.schedule(delay);
        }
    }

    fn display_event(&self) -> PlaybackEvent {
        match self.stream.current() {
            Current::Token(token) => PlaybackEvent::TokenChanged {
                token: token.clone(),
                index: self.stream.cursor(),
                total: self.stream.len(),
            },
            Current::Finished => PlaybackEvent::Finished,
            Current::Empty => PlaybackEvent::Cleared,
        }
    }

    fn sample_now(&self) -> ReadingStats {
        self.stats.sample(self.clock.now(), self.stream.cursor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::{Duration, Instant};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum TimerOp {
        Schedule(u64),
        Cancel,
    }

    /// Records every call and panics on a double schedule.
    #[derive(Default)]
    struct RecordingScheduler {
        pending: Option<Duration>,
        ops: Vec<TimerOp>,
    }

    impl Scheduler for RecordingScheduler {
        fn schedule(&mut self, delay: Duration) {
            assert!(
                self.pending.is_none(),
                "schedule called while a timer is pending"
            );
            self.pending = Some(delay);
            self.ops.push(TimerOp::Schedule(delay.as_millis() as u64));
        }

        fn cancel(&mut self) {
            self.pending = None;
            self.ops.push(TimerOp::Cancel);
        }

        fn is_scheduled(&self) -> bool {
            self.pending.is_some()
        }
    }

    impl RecordingScheduler {
        fn schedules(&self) -> Vec<u64> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    TimerOp::Schedule(ms) => Some(*ms),
                    TimerOp::Cancel => None,
                })
                .collect()
        }

        fn every_schedule_follows_cancel(&self) -> bool {
            self.ops.iter().enumerate().all(|(i, op)| match op {
                TimerOp::Schedule(_) => i > 0 && self.ops[i - 1] == TimerOp::Cancel,
                TimerOp::Cancel => true,
            })
        }
    }

    struct ManualClock {
        now: Cell<Instant>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Cell::new(Instant::now()),
            }
        }

        fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.now.get()
        }
    }

    type TestController = PlaybackController<RecordingScheduler, ManualClock>;

    fn controller(text: &str, wpm: u32) -> TestController {
        let mut controller = PlaybackController::with_parts(
            wpm,
            PacingPolicy::default(),
            RecordingScheduler::default(),
            ManualClock::new(),
        );
        if !text.is_empty() {
            controller.load_text(text, "test").unwrap();
        }
        controller
    }

    fn finished_count(events: &[PlaybackEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, PlaybackEvent::Finished))
            .count()
    }

    fn shown(events: &[PlaybackEvent]) -> Option<(&str, usize)> {
        events.iter().find_map(|e| match e {
            PlaybackEvent::TokenChanged { token, index, .. } => Some((token.as_str(), *index)),
            _ => None,
        })
    }

    #[test]
    fn test_new_controller_is_idle() {
        let c = controller("", 300);
        assert_eq!(c.state(), PlaybackState::Idle);
        assert!(c.stream().is_empty());
        assert!(!c.scheduler().is_scheduled());
    }

    #[test]
    fn test_rate_is_clamped_on_construction() {
        assert_eq!(controller("", 10).base_rate(), 50);
        assert_eq!(controller("", 4000).base_rate(), 1000);
    }

    #[test]
    fn test_load_pauses_on_first_token() {
        let mut c = controller("", 300);
        let events = c.load_text("Hello there", "test").unwrap();
        assert_eq!(c.state(), PlaybackState::Paused);
        assert_eq!(shown(&events), Some(("Hello", 0)));
        assert!(matches!(
            events[0],
            PlaybackEvent::TokenChanged { total: 2, .. }
        ));
    }

    #[test]
    fn test_load_empty_text_keeps_previous_stream() {
        let mut c = controller("keep these words", 300);
        c.step_forward();
        c.start();

        let err = c.load_text("   \n ", "blank.txt").unwrap_err();
        assert!(matches!(err, LoadError::EmptyDocument(ref s) if s == "blank.txt"));
        assert_eq!(c.stream().len(), 3);
        assert_eq!(c.stream().cursor(), 1);
        assert_eq!(c.state(), PlaybackState::Playing);
        assert!(c.scheduler().is_scheduled());
    }

    #[test]
    fn test_load_while_playing_stops_timer() {
        let mut c = controller("old words", 300);
        c.start();
        c.load_text("new words here", "test").unwrap();
        assert_eq!(c.state(), PlaybackState::Paused);
        assert!(!c.scheduler().is_scheduled());
        assert_eq!(c.stream().cursor(), 0);
    }

    #[test]
    fn test_start_displays_then_schedules() {
        let mut c = controller("end. next", 300);
        let events = c.start();
        assert_eq!(c.state(), PlaybackState::Playing);
        assert_eq!(shown(&events), Some(("end.", 0)));
        assert_eq!(c.scheduler().schedules(), vec![300]);
    }

    #[test]
    fn test_start_on_empty_stream_does_nothing() {
        let mut c = controller("", 300);
        assert!(c.start().is_empty());
        assert_eq!(c.state(), PlaybackState::Idle);
        assert!(!c.scheduler().is_scheduled());
    }

    #[test]
    fn test_start_twice_keeps_single_timer() {
        let mut c = controller("one two three", 300);
        c.start();
        c.start();
        assert!(c.scheduler().is_scheduled());
        assert_eq!(c.scheduler().schedules().len(), 2);
        assert!(c.scheduler().every_schedule_follows_cancel());
    }

    #[test]
    fn test_tick_advances_and_reschedules_with_new_delay() {
        let mut c = controller("plain mid, end.", 300);
        c.start();
        let events = c.tick();
        assert_eq!(shown(&events), Some(("mid,", 1)));
        c.tick();
        assert_eq!(c.scheduler().schedules(), vec![200, 240, 300]);
    }

    #[test]
    fn test_three_tokens_finish_once() {
        let mut c = controller("one two three", 300);
        let mut events = c.start();
        for _ in 0..3 {
            events.extend(c.tick());
        }
        assert_eq!(finished_count(&events), 1);
        assert_eq!(c.stream().cursor(), 3);
        assert_eq!(c.state(), PlaybackState::Idle);
        assert!(!c.scheduler().is_scheduled());

        // late ticks are ignored
        assert!(c.tick().is_empty());
        assert_eq!(c.stream().cursor(), 3);
    }

    #[test]
    fn test_finish_reports_stats() {
        let mut c = controller("one two", 300);
        c.start();
        c.clock().advance(Duration::from_millis(200));
        c.tick();
        c.clock().advance(Duration::from_millis(200));
        let events = c.tick();
        let stats = events
            .iter()
            .find_map(|e| match e {
                PlaybackEvent::StatsUpdated(stats) => Some(*stats),
                _ => None,
            })
            .unwrap();
        assert_eq!(stats.words_read, 2);
        assert_eq!(stats.elapsed, Duration::from_millis(400));
        assert!((stats.effective_wpm - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_start_after_finish_is_noop() {
        let mut c = controller("one", 300);
        c.start();
        c.tick();
        assert!(c.start().is_empty());
        assert_eq!(c.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_pause_cancels_and_keeps_cursor() {
        let mut c = controller("one two three", 300);
        c.start();
        c.tick();
        let events = c.pause();
        assert_eq!(c.state(), PlaybackState::Paused);
        assert_eq!(c.stream().cursor(), 1);
        assert!(!c.scheduler().is_scheduled());
        assert!(matches!(events.as_slice(), [PlaybackEvent::StatsUpdated(_)]));
    }

    #[test]
    fn test_pause_when_not_playing_is_quiet() {
        let mut c = controller("one two", 300);
        assert!(c.pause().is_empty());
        assert_eq!(c.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_toggle() {
        let mut c = controller("one two", 300);
        c.toggle();
        assert!(c.is_playing());
        c.toggle();
        assert_eq!(c.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_tick_while_paused_is_ignored() {
        let mut c = controller("one two", 300);
        c.start();
        c.pause();
        assert!(c.tick().is_empty());
        assert_eq!(c.stream().cursor(), 0);
    }

    #[test]
    fn test_reset_from_every_state() {
        // playing
        let mut c = controller("one two three", 300);
        c.start();
        c.tick();
        let events = c.reset();
        assert_eq!(c.stream().cursor(), 0);
        assert_eq!(c.state(), PlaybackState::Paused);
        assert!(!c.scheduler().is_scheduled());
        assert_eq!(shown(&events), Some(("one", 0)));

        // paused
        c.step_forward();
        c.reset();
        assert_eq!(c.stream().cursor(), 0);

        // finished
        c.start();
        for _ in 0..3 {
            c.tick();
        }
        assert_eq!(c.state(), PlaybackState::Idle);
        c.reset();
        assert_eq!(c.stream().cursor(), 0);
        assert_eq!(c.state(), PlaybackState::Paused);
        assert!(!c.scheduler().is_scheduled());
    }

    #[test]
    fn test_reset_empty_stream_shows_placeholder() {
        let mut c = controller("", 300);
        let events = c.reset();
        assert_eq!(events, vec![PlaybackEvent::Cleared]);
        assert_eq!(c.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_seek_while_paused() {
        let mut c = controller("a b c d e", 300);
        let events = c.seek(SeekTarget::Fraction(0.5));
        assert_eq!(shown(&events), Some(("c", 2)));
        assert_eq!(c.state(), PlaybackState::Paused);
        assert!(!c.scheduler().is_scheduled());
    }

    #[test]
    fn test_seek_while_playing_restarts_single_timer() {
        let mut c = controller("a b c d e", 300);
        c.start();
        let events = c.seek(SeekTarget::Index(3));
        assert_eq!(shown(&events), Some(("d", 3)));
        assert!(c.is_playing());
        assert!(c.scheduler().is_scheduled());
        assert!(c.scheduler().every_schedule_follows_cancel());
    }

    #[test]
    fn test_seek_on_empty_stream_is_noop() {
        let mut c = controller("", 300);
        assert!(c.seek(SeekTarget::Fraction(0.3)).is_empty());
        assert_eq!(c.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_seek_after_finish_pauses_on_valid_token() {
        let mut c = controller("a b", 300);
        c.start();
        c.tick();
        c.tick();
        c.seek(SeekTarget::Fraction(0.0));
        assert_eq!(c.state(), PlaybackState::Paused);
        assert_eq!(c.stream().cursor(), 0);
    }

    #[test]
    fn test_seek_resets_session_stats() {
        let mut c = controller("a b c d e", 300);
        c.start();
        c.clock().advance(Duration::from_secs(1));
        c.tick();
        c.seek(SeekTarget::Index(0));
        let stats = c.sample_stats().unwrap();
        assert_eq!(stats.words_read, 0);
        assert_eq!(stats.elapsed, Duration::ZERO);
    }

    #[test]
    fn test_change_rate_while_playing_rearms_from_same_cursor() {
        let mut c = controller("one two three", 300);
        c.start();
        c.tick();
        c.change_rate(600);
        assert_eq!(c.base_rate(), 600);
        assert_eq!(c.stream().cursor(), 1);
        assert!(c.is_playing());
        assert_eq!(c.scheduler().schedules(), vec![200, 200, 100]);
        assert!(c.scheduler().every_schedule_follows_cancel());
    }

    #[test]
    fn test_change_rate_while_paused_does_not_schedule() {
        let mut c = controller("one two", 300);
        assert!(c.change_rate(450).is_empty());
        assert_eq!(c.base_rate(), 450);
        assert!(!c.scheduler().is_scheduled());
    }

    #[test]
    fn test_change_rate_clamps() {
        let mut c = controller("one", 300);
        c.change_rate(-20);
        assert_eq!(c.base_rate(), 50);
        c.change_rate(1_000_000);
        assert_eq!(c.base_rate(), 1000);
    }

    #[test]
    fn test_step_forward_and_back() {
        let mut c = controller("one two", 300);
        assert_eq!(shown(&c.step_forward()), Some(("two", 1)));
        assert!(c.step_forward().is_empty());
        assert_eq!(shown(&c.step_back()), Some(("one", 0)));
        assert!(c.step_back().is_empty());
    }

    #[test]
    fn test_step_back_after_finish() {
        let mut c = controller("one two", 300);
        c.start();
        c.tick();
        c.tick();
        assert_eq!(shown(&c.step_back()), Some(("two", 1)));
        assert_eq!(c.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_step_while_playing_rearms() {
        let mut c = controller("one two three", 300);
        c.start();
        c.step_forward();
        assert!(c.is_playing());
        assert!(c.scheduler().is_scheduled());
        assert!(c.scheduler().every_schedule_follows_cancel());
    }

    #[test]
    fn test_close_clears_everything() {
        let mut c = controller("one two", 300);
        c.start();
        let events = c.close();
        assert_eq!(events, vec![PlaybackEvent::Cleared]);
        assert_eq!(c.state(), PlaybackState::Idle);
        assert!(c.stream().is_empty());
        assert!(!c.scheduler().is_scheduled());
        assert!(c.sample_stats().is_none());
    }

    #[test]
    fn test_any_command_sequence_keeps_at_most_one_timer() {
        let mut c = controller("The quick brown fox jumps over the lazy dog.", 300);
        let mut seed = 7u32;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            match (seed >> 16) % 8 {
                0 => {
                    let _ = c.start();
                }
                1 => {
                    let _ = c.pause();
                }
                2 => {
                    let _ = c.seek(SeekTarget::Fraction((seed % 100) as f64 / 100.0));
                }
                3 => {
                    let _ = c.change_rate((seed % 1200) as i64);
                }
                4 => {
                    let _ = c.tick();
                }
                5 => {
                    let _ = c.reset();
                }
                6 => {
                    let _ = c.step_forward();
                }
                _ => {
                    let _ = c.toggle();
                }
            }
            assert_eq!(c.scheduler().is_scheduled(), c.is_playing());
        }
        assert!(c.scheduler().every_schedule_follows_cancel());
    }

    #[test]
    fn test_sample_stats_before_start() {
        let c = controller("one", 300);
        assert!(c.sample_stats().is_none());
    }
}
