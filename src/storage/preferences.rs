use crate::engine::{clamp_wpm, DEFAULT_WPM};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Cannot write preferences to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot encode preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme '{}' (expected light or dark)", other)),
        }
    }
}

/// Values remembered between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preferences {
    pub base_rate: u32,
    pub theme: Theme,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            base_rate: DEFAULT_WPM,
            theme: Theme::default(),
        }
    }
}

impl Preferences {
    /// Read preferences from TOML, keeping every field that makes sense and
    /// defaulting the rest.
    pub fn from_toml(contents: &str) -> Self {
        let mut prefs = Preferences::default();

        let table: toml::Table = match toml::from_str(contents) {
            Ok(table) => table,
            Err(e) => {
                log::warn!("Ignoring unreadable preferences: {}", e);
                return prefs;
            }
        };

        match table.get("base_rate") {
            Some(toml::Value::Integer(n)) => prefs.base_rate = clamp_wpm(*n),
            Some(toml::Value::Float(f)) if f.is_finite() => {
                prefs.base_rate = clamp_wpm(f.round() as i64)
            }
            Some(toml::Value::String(s)) => match s.trim().parse::<i64>() {
                Ok(n) => prefs.base_rate = clamp_wpm(n),
                Err(_) => log::warn!("Ignoring non-numeric base_rate '{}'", s),
            },
            Some(other) => log::warn!("Ignoring base_rate of type {}", other.type_str()),
            None => {}
        }

        match table.get("theme") {
            Some(toml::Value::String(s)) => match s.parse() {
                Ok(theme) => prefs.theme = theme,
                Err(e) => log::warn!("{}", e),
            },
            Some(other) => log::warn!("Ignoring theme of type {}", other.type_str()),
            None => {}
        }

        prefs
    }
}

/// Durable home for `Preferences`.
pub trait PreferencesStore {
    /// Never fails: anything missing or corrupt falls back to defaults.
    fn load(&self) -> Preferences;

    fn save(&mut self, prefs: &Preferences) -> Result<(), StorageError>;
}

/// Preferences kept in a TOML file.
#[derive(Debug, Clone)]
pub struct FilePreferencesStore {
    path: PathBuf,
}

impl FilePreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `~/.config/swiftread/preferences.toml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("swiftread")
            .join("preferences.toml")
    }
}

impl PreferencesStore for FilePreferencesStore {
    fn load(&self) -> Preferences {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Preferences::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Preferences::default(),
            Err(e) => {
                log::warn!("Cannot read {}: {}", self.path.display(), e);
                Preferences::default()
            }
        }
    }

    fn save(&mut self, prefs: &Preferences) -> Result<(), StorageError> {
        let io_error = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let contents = toml::to_string(prefs)?;
        fs::write(&self.path, contents).map_err(io_error)?;
        log::debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}

/// Preferences kept in memory. Clones share the same slot, so a caller can
/// hand one clone away and inspect what was saved through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferencesStore {
    saved: Rc<RefCell<Option<Preferences>>>,
    save_count: Rc<RefCell<usize>>,
}

impl MemoryPreferencesStore {
    pub fn with(prefs: Preferences) -> Self {
        let store = Self::default();
        *store.saved.borrow_mut() = Some(prefs);
        store
    }

    pub fn last_saved(&self) -> Option<Preferences> {
        *self.saved.borrow()
    }

    pub fn save_count(&self) -> usize {
        *self.save_count.borrow()
    }
}

impl PreferencesStore for MemoryPreferencesStore {
    fn load(&self) -> Preferences {
        self.last_saved().unwrap_or_default()
    }

    fn save(&mut self, prefs: &Preferences) -> Result<(), StorageError> {
        *self.saved.borrow_mut() = Some(*prefs);
        *self.save_count.borrow_mut() += 1;
        Ok(())
    }
}
