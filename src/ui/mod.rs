pub mod command;
pub mod reader;
pub mod terminal;
pub mod terminal_guard;
pub mod theme;

pub use command::{command_to_app_event, parse_command, Command};
pub use reader::view::{format_estimate, render_progress_bar, render_reader, render_word_display};
pub use terminal::TuiManager;
pub use terminal_guard::TerminalGuard;
pub use theme::Palette;
