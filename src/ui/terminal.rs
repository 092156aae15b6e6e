use crate::app::{App, AppMode};
use crate::ui::reader::view::render_reader;
use crate::ui::terminal_guard::TerminalGuard;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

/// Longest the loop blocks while a load is running, so its result shows promptly.
const LOADING_POLL: Duration = Duration::from_millis(1000 / 60);
/// Longest the loop blocks otherwise; keeps the live stats ticking over.
const IDLE_POLL: Duration = Duration::from_millis(250);

pub struct TuiManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    _guard: TerminalGuard,
}

impl TuiManager {
    pub fn new() -> Result<Self, io::Error> {
        let guard = TerminalGuard::new()?;

        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(TuiManager {
            terminal,
            _guard: guard,
        })
    }

    /// Drive the app until it quits.
    ///
    /// The one-shot playback timer is a deadline; crossterm is polled for no
    /// longer than the time left on it, and the tick fires once it is due.
    pub fn run_event_loop(&mut self, app: &mut App) -> io::Result<()> {
        loop {
            app.poll_pending_load();
            if app.timer_due(Instant::now()) {
                app.on_timer_due();
            }
            if app.mode() == AppMode::Quit {
                return Ok(());
            }

            self.render_frame(app)?;

            let mut timeout = if app.is_loading() {
                LOADING_POLL
            } else {
                IDLE_POLL
            };
            if let Some(remaining) = app.timer_remaining(Instant::now()) {
                timeout = timeout.min(remaining);
            }

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                    // Resize and the rest just trigger a redraw on the next pass.
                    _ => {}
                }
            }
        }
    }

    pub fn render_frame(&mut self, app: &App) -> io::Result<()> {
        let render_state = app.get_render_state();
        self.terminal
            .draw(|frame| render_reader(frame, &render_state))?;
        Ok(())
    }
}
