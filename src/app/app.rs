use super::event::AppEvent;
use super::mode::AppMode;
use super::render_state::{RenderState, StatusLine, WordDisplay};
use crate::engine::{DeadlineTimer, WPM_STEP};
use crate::input::{LoadError, LoadRequest, LoadedDocument, PendingLoad};
use crate::reading::{PlaybackController, PlaybackEvent, ReadingStats, SeekTarget};
use crate::storage::{Preferences, PreferencesStore, Theme};
use crate::ui::command::{command_to_app_event, parse_command};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Presentation model: owns the playback controller and preferences, turns
/// keys and commands into controller calls, and folds the resulting
/// notifications into something the UI can draw.
pub struct App {
    mode: AppMode,
    controller: PlaybackController,
    preferences: Preferences,
    store: Box<dyn PreferencesStore>,
    display: WordDisplay,
    document: Option<String>,
    last_stats: Option<ReadingStats>,
    status: Option<StatusLine>,
    input: String,
    pending: Option<PendingLoad>,
    help_visible: bool,
}

impl App {
    pub fn new(store: Box<dyn PreferencesStore>) -> Self {
        let preferences = store.load();
        log::info!(
            "Starting at {} wpm with the {} theme",
            preferences.base_rate,
            preferences.theme
        );
        let controller = PlaybackController::new(preferences.base_rate);
        // The controller clamps; keep preferences in step with it.
        let preferences = Preferences {
            base_rate: controller.base_rate(),
            ..preferences
        };

        Self {
            mode: AppMode::Reader,
            controller,
            preferences,
            store,
            display: WordDisplay::Empty,
            document: None,
            last_stats: None,
            status: None,
            input: String::new(),
            pending: None,
            help_visible: false,
        }
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::LoadFile(path) => self.begin_load(LoadRequest::File(expand_home(&path))),
            AppEvent::LoadClipboard => self.begin_load(LoadRequest::Clipboard),
            AppEvent::Quit => {
                let events = self.controller.pause();
                self.apply_events(events);
                self.mode = AppMode::Quit;
            }
            AppEvent::Help => self.help_visible = true,
            AppEvent::SetRate(raw) => match parse_rate(&raw) {
                Some(wpm) => self.set_rate(wpm),
                None => {
                    self.status = Some(StatusLine::warning(format!(
                        "'{}' is not a number, keeping {} WPM",
                        raw.trim(),
                        self.controller.base_rate()
                    )))
                }
            },
            AppEvent::AdjustRate(delta) => {
                self.set_rate(self.controller.base_rate() as i64 + delta as i64)
            }
            AppEvent::SetTheme(theme) => self.set_theme(theme),
            AppEvent::ToggleTheme => self.set_theme(self.preferences.theme.toggled()),
            AppEvent::Seek(target) => {
                let events = self.controller.seek(target);
                self.apply_events(events);
            }
            AppEvent::Reset => {
                let events = self.controller.reset();
                self.apply_events(events);
            }
            AppEvent::Close => {
                let events = self.controller.close();
                self.apply_events(events);
            }
            AppEvent::TogglePlayback => self.toggle_playback(),
            AppEvent::StepForward => {
                let events = self.controller.step_forward();
                self.apply_events(events);
            }
            AppEvent::StepBack => {
                let events = self.controller.step_back();
                self.apply_events(events);
            }
            AppEvent::Warning(message) => self.status = Some(StatusLine::warning(message)),
            AppEvent::InvalidCommand(input) => {
                self.status = Some(StatusLine::error(format!("Unknown command: {}", input)))
            }
            AppEvent::None => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.handle_event(AppEvent::Quit);
            return;
        }

        if self.help_visible {
            self.help_visible = false;
            return;
        }

        match self.mode {
            AppMode::Reader => match key.code {
                KeyCode::Char(c @ (':' | '@')) => {
                    self.input = c.to_string();
                    self.mode = AppMode::Command;
                }
                _ => self.handle_event(reader_key_event(key)),
            },
            AppMode::Command => self.handle_command_key(key),
            AppMode::Quit => {}
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input.clear();
                self.mode = AppMode::Reader;
            }
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.input);
                self.mode = AppMode::Reader;
                let event = command_to_app_event(parse_command(&line));
                self.handle_event(event);
            }
            KeyCode::Backspace => {
                self.input.pop();
                if self.input.is_empty() {
                    self.mode = AppMode::Reader;
                }
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn toggle_playback(&mut self) {
        if !self.controller.is_playing() && self.controller.stream().is_finished() {
            let text = if self.controller.stream().is_empty() {
                "Nothing loaded. Type @path to open a file"
            } else {
                "Finished. Press r to read again"
            };
            self.status = Some(StatusLine::info(text));
            return;
        }
        let events = self.controller.toggle();
        self.apply_events(events);
    }

    /// Change the base rate (clamped) and remember it.
    pub fn set_rate(&mut self, wpm: i64) {
        let events = self.controller.change_rate(wpm);
        self.apply_events(events);
        self.preferences.base_rate = self.controller.base_rate();
        self.status = Some(StatusLine::info(format!(
            "Speed: {} WPM",
            self.preferences.base_rate
        )));
        self.persist();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.preferences.theme = theme;
        self.status = Some(StatusLine::info(format!("Theme: {}", theme)));
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.preferences) {
            log::warn!("{}", err);
            self.status = Some(StatusLine::warning(format!(
                "Could not save preferences: {}",
                err
            )));
        }
    }

    /// Start extracting a document in the background. A load already in
    /// flight is abandoned; its result is discarded.
    pub fn begin_load(&mut self, request: LoadRequest) {
        if let Some(previous) = self.pending.take() {
            log::debug!("Abandoning load of {}", previous.label());
        }
        let pending = PendingLoad::spawn(request);
        self.status = Some(StatusLine::info(format!("Loading {}...", pending.label())));
        self.pending = Some(pending);
    }

    /// Pick up a finished background load, if any.
    pub fn poll_pending_load(&mut self) {
        let Some(result) = self.pending.as_ref().and_then(PendingLoad::try_take) else {
            return;
        };
        self.pending = None;
        self.complete_load(result);
    }

    /// Hand an extraction result to the controller. Failures and empty
    /// documents leave whatever was loaded before untouched.
    pub fn complete_load(&mut self, result: Result<LoadedDocument, LoadError>) {
        let outcome = result.and_then(|doc| {
            let events = self.controller.load_text(&doc.text, &doc.source)?;
            Ok((doc.title, events))
        });

        match outcome {
            Ok((title, events)) => {
                self.last_stats = None;
                self.apply_events(events);
                self.status = Some(StatusLine::info(format!(
                    "Loaded {}: {} words",
                    title,
                    self.controller.stream().len()
                )));
                self.document = Some(title);
            }
            Err(err) => {
                log::warn!("{}", err);
                self.status = Some(StatusLine::error(err.to_string()));
            }
        }
    }

    /// Time the event loop may block before the next tick is due.
    pub fn timer_remaining(&self, now: Instant) -> Option<Duration> {
        self.timer().remaining(now)
    }

    pub fn timer_due(&self, now: Instant) -> bool {
        self.timer().is_due(now)
    }

    pub fn on_timer_due(&mut self) {
        let events = self.controller.tick();
        self.apply_events(events);
    }

    fn timer(&self) -> &DeadlineTimer {
        self.controller.scheduler()
    }

    fn apply_events(&mut self, events: Vec<PlaybackEvent>) {
        for event in events {
            match event {
                PlaybackEvent::TokenChanged {
                    token,
                    index,
                    total,
                } => {
                    self.display = WordDisplay::Word {
                        text: token.as_str().to_string(),
                        index,
                        total,
                    };
                }
                PlaybackEvent::Cleared => {
                    self.display = WordDisplay::Empty;
                    self.document = None;
                    self.last_stats = None;
                }
                PlaybackEvent::Finished => self.display = WordDisplay::Finished,
                PlaybackEvent::StatsUpdated(stats) => self.last_stats = Some(stats),
            }
        }
    }

    pub fn get_render_state(&self) -> RenderState {
        let mut state = RenderState::empty(
            self.mode,
            self.preferences.theme,
            self.controller.base_rate(),
        );

        let stream = self.controller.stream();
        if !stream.is_empty() {
            state.position = Some(((stream.cursor() + 1).min(stream.len()), stream.len()));
            state.progress = stream.progress_fraction().clamp(0.0, 1.0);
            state.estimated_seconds = Some(stream.estimated_total_seconds(self.controller.base_rate()));
        }

        state.playback = self.controller.state();
        state.display = self.display.clone();
        state.stats = if self.controller.is_playing() {
            self.controller.sample_stats()
        } else {
            self.last_stats
        };
        state.document = self.document.clone();
        state.loading = self.pending.as_ref().map(|p| p.label().to_string());
        state.status = self.status.clone();
        state.input = self.input.clone();
        state.help_visible = self.help_visible;
        state
    }
}

/// Map a key pressed in reader mode.
pub fn reader_key_event(key: KeyEvent) -> AppEvent {
    match key.code {
        KeyCode::Char(' ') => AppEvent::TogglePlayback,
        KeyCode::Left => AppEvent::StepBack,
        KeyCode::Right => AppEvent::StepForward,
        KeyCode::Esc => AppEvent::Close,
        KeyCode::Char('r') | KeyCode::Char('R') => AppEvent::Reset,
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => AppEvent::AdjustRate(WPM_STEP),
        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Down => {
            AppEvent::AdjustRate(-WPM_STEP)
        }
        KeyCode::Char('t') | KeyCode::Char('T') => AppEvent::ToggleTheme,
        KeyCode::Char(digit @ '0'..='9') => {
            let tenths = (digit as u8 - b'0') as f64;
            AppEvent::Seek(SeekTarget::Fraction(tenths / 10.0))
        }
        KeyCode::Char('?') => AppEvent::Help,
        KeyCode::Char('q') => AppEvent::Quit,
        _ => AppEvent::None,
    }
}

/// Accepts integers and decimals (truncated). Anything else is rejected.
fn parse_rate(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(|value| value.trunc() as i64)
    })
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
