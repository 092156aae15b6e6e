/// Which part of the screen owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Keys drive playback.
    Reader,
    /// Keys are typed into the command deck.
    Command,
    Quit,
}

impl AppMode {
    pub fn label(self) -> &'static str {
        match self {
            AppMode::Reader => " READER ",
            AppMode::Command => " COMMAND ",
            AppMode::Quit => " QUIT ",
        }
    }
}
