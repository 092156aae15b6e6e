//! Persistence of user preferences between sessions.

pub mod preferences;

pub use preferences::{
    FilePreferencesStore, MemoryPreferencesStore, Preferences, PreferencesStore, StorageError,
    Theme,
};
