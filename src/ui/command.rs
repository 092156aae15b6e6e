//! Command parsing for the TUI command deck
//!
//! Parses user input in Command mode, supporting:
//! - `:q` or `:quit` → Quit command
//! - `:h` or `:help` → Help command
//! - `:wpm N` → Set reading speed
//! - `:theme light|dark|toggle` → Switch colour scheme
//! - `:seek N%` or `:seek N` → Jump to a fraction of the text or to word N
//! - `:reset`, `:close` → Back to the first word, or drop the document
//! - `@filename.pdf`, `@filename.epub`, `@notes.txt` → Load file command
//! - `@@` → Load clipboard

use crate::app::AppEvent;
use crate::reading::SeekTarget;
use crate::storage::Theme;

/// Commands that can be parsed from command deck input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    LoadFile(String),
    LoadClipboard,
    SetRate(String),
    SetTheme(Theme),
    ToggleTheme,
    Seek(SeekTarget),
    Reset,
    Close,
    /// Known command with an unusable argument; carries a usage hint.
    Invalid(String),
    Unknown(String),
}

/// Parse command deck input string into a Command
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();

    if input.is_empty() {
        return Command::Unknown(input.to_string());
    }

    if let Some(cmd) = input.strip_prefix(':') {
        let (name, arg) = match cmd.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (cmd, ""),
        };
        match name {
            "q" | "quit" => Command::Quit,
            "h" | "help" => Command::Help,
            "wpm" | "speed" => {
                if arg.is_empty() {
                    Command::Invalid("Usage: :wpm N".to_string())
                } else {
                    Command::SetRate(arg.to_string())
                }
            }
            "theme" => parse_theme(arg),
            "seek" => parse_seek(arg),
            "reset" => Command::Reset,
            "close" => Command::Close,
            _ => Command::Unknown(input.to_string()),
        }
    } else if let Some(rest) = input.strip_prefix('@') {
        let filename = rest.trim();
        if filename.is_empty() || filename == "@" {
            Command::LoadClipboard
        } else {
            Command::LoadFile(filename.to_string())
        }
    } else {
        Command::Unknown(input.to_string())
    }
}

fn parse_theme(arg: &str) -> Command {
    if arg.is_empty() || arg.eq_ignore_ascii_case("toggle") {
        return Command::ToggleTheme;
    }
    match arg.parse::<Theme>() {
        Ok(theme) => Command::SetTheme(theme),
        Err(message) => Command::Invalid(message),
    }
}

fn parse_seek(arg: &str) -> Command {
    const USAGE: &str = "Usage: :seek N% or :seek N";

    if let Some(percent) = arg.strip_suffix('%') {
        return match percent.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Command::Seek(SeekTarget::Fraction(value / 100.0)),
            _ => Command::Invalid(USAGE.to_string()),
        };
    }
    match arg.parse::<usize>() {
        // Word numbers are 1-based on screen.
        Ok(word) => Command::Seek(SeekTarget::Index(word.saturating_sub(1))),
        Err(_) => Command::Invalid(USAGE.to_string()),
    }
}

/// Convert a parsed command into an AppEvent
///
/// This is the translation layer between command deck input and App core.
pub fn command_to_app_event(command: Command) -> AppEvent {
    match command {
        Command::Quit => AppEvent::Quit,
        Command::Help => AppEvent::Help,
        Command::LoadFile(path) => AppEvent::LoadFile(path),
        Command::LoadClipboard => AppEvent::LoadClipboard,
        Command::SetRate(raw) => AppEvent::SetRate(raw),
        Command::SetTheme(theme) => AppEvent::SetTheme(theme),
        Command::ToggleTheme => AppEvent::ToggleTheme,
        Command::Seek(target) => AppEvent::Seek(target),
        Command::Reset => AppEvent::Reset,
        Command::Close => AppEvent::Close,
        Command::Invalid(message) => AppEvent::Warning(message),
        Command::Unknown(input) => AppEvent::InvalidCommand(input),
    }
}
