//! Log setup. The terminal belongs to the UI, so records go to a file.

use anyhow::Context;
use env_logger::{Env, Target};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// `~/.cache/swiftread/swiftread.log` on Linux.
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("swiftread")
        .join("swiftread.log")
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install env_logger writing to `path`. `RUST_LOG` overrides the `info` default.
pub fn init(path: &Path) -> anyhow::Result<()> {
    let file = open_log_file(path)
        .with_context(|| format!("Cannot open log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_target(false)
        .try_init()
        .context("A logger is already installed")?;
    Ok(())
}
