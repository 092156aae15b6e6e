use crate::input::LOADER_THREAD_NAME;
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use crossterm::ExecutableCommand;
use std::io;
use std::sync::Once;

static PANIC_HOOK_SET: Once = Once::new();

/// Raw mode and the alternate screen for as long as the guard lives.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn new() -> Result<Self, io::Error> {
        enable_raw_mode()?;
        if let Err(err) = io::stdout().execute(terminal::EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err);
        }

        set_panic_hook();

        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
    }
}

fn restore() {
    let _ = io::stdout().execute(terminal::LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

fn set_panic_hook() {
    PANIC_HOOK_SET.call_once(|| {
        std::panic::set_hook(Box::new(|panic_info| {
            // A loader panic only fails that load; the UI keeps running.
            if std::thread::current().name() == Some(LOADER_THREAD_NAME) {
                log::error!("Loader panicked: {}", panic_info);
                return;
            }
            restore();
            log::error!("Panic: {}", panic_info);
            eprintln!("Panic: {}", panic_info);
            std::process::exit(1);
        }));
    });
}
