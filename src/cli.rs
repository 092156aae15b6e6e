//! Command-line interface for swiftread

use crate::storage::Theme;
use clap::Parser;
use std::path::PathBuf;

/// Speed reader for the terminal: one word at a time
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "swiftread", version, about = "Speed reader for the terminal")]
pub struct Cli {
    /// PDF, EPUB or text file to open at startup
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Reading speed in words per minute (50-1000); saved for next time
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub wpm: Option<i64>,

    /// Colour theme (light or dark); saved for next time
    #[arg(long, value_name = "THEME")]
    pub theme: Option<Theme>,

    /// Preferences file to use instead of the default
    #[arg(long, value_name = "FILE")]
    pub prefs: Option<PathBuf>,

    /// Log file to write to instead of the default
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}
