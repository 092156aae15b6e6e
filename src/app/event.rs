use crate::reading::SeekTarget;
use crate::storage::Theme;

/// Application events
#[derive(Debug, PartialEq, Clone)]
pub enum AppEvent {
    LoadFile(String),
    LoadClipboard,
    Quit,
    Help,
    /// Raw rate text from the command deck; non-numeric input keeps the current rate.
    SetRate(String),
    AdjustRate(i32),
    SetTheme(Theme),
    ToggleTheme,
    Seek(SeekTarget),
    Reset,
    Close,
    TogglePlayback,
    StepForward,
    StepBack,
    Warning(String),
    InvalidCommand(String),
    None,
}
