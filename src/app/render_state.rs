use crate::app::mode::AppMode;
use crate::reading::{PlaybackState, ReadingStats};
use crate::storage::Theme;

/// What the big word area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum WordDisplay {
    /// No document loaded.
    Empty,
    Word {
        text: String,
        index: usize,
        total: usize,
    },
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Render state for UI components
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub mode: AppMode,
    pub theme: Theme,
    pub playback: PlaybackState,
    pub display: WordDisplay,
    /// 1-based word number and total, when a document is loaded.
    pub position: Option<(usize, usize)>,
    /// `0.0..=1.0`.
    pub progress: f64,
    pub base_rate: u32,
    pub estimated_seconds: Option<f64>,
    pub stats: Option<ReadingStats>,
    pub document: Option<String>,
    pub loading: Option<String>,
    pub status: Option<StatusLine>,
    pub input: String,
    pub help_visible: bool,
}

impl RenderState {
    /// Create an empty render state for when no document is loaded
    pub fn empty(mode: AppMode, theme: Theme, base_rate: u32) -> Self {
        Self {
            mode,
            theme,
            playback: PlaybackState::Idle,
            display: WordDisplay::Empty,
            position: None,
            progress: 0.0,
            base_rate,
            estimated_seconds: None,
            stats: None,
            document: None,
            loading: None,
            status: None,
            input: String::new(),
            help_visible: false,
        }
    }

    pub fn current_word(&self) -> Option<&str> {
        match &self.display {
            WordDisplay::Word { text, .. } => Some(text),
            _ => None,
        }
    }
}
