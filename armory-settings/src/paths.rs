//! Where armory keeps its files.
//!
//! Follows the platform conventions from `directories`: XDG on Linux,
//! Application Support on macOS, Roaming AppData on Windows.

use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "armory", "armory")
}

/// Directory for persistent data, or `None` without a home directory.
///
/// - Linux: `$XDG_DATA_HOME/armory` or `~/.local/share/armory`
/// - macOS: `~/Library/Application Support/dev.armory.armory`
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Preference database path inside [`data_dir`].
pub fn settings_db() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("settings.db"))
}

/// Create the data directory if needed and return it.
pub fn ensure_data_dir() -> io::Result<PathBuf> {
    let dir = data_dir().ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
