//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "campus";
const APPLICATION: &str = "campus";

const LATEST_LOG: &str = "latest.log";

/// Maximum number of old log files to keep.
const MAX_OLD_LOGS: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Data directory for the settings database.
///
/// - Linux: `$XDG_DATA_HOME/campus` or `~/.local/share/campus`
/// - macOS: `~/Library/Application Support/dev.campus.campus`
/// - Windows: `C:\Users\<User>\AppData\Roaming\campus\campus\data`
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Cache directory, home of the log files.
///
/// - Linux: `$XDG_CACHE_HOME/campus` or `~/.cache/campus`
/// - macOS: `~/Library/Caches/dev.campus.campus`
/// - Windows: `C:\Users\<User>\AppData\Local\campus\campus\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the settings database.
pub fn settings_db() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("settings.db"))
}

/// Path to the current log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Rename `latest.log` to a timestamped name and drop the oldest archives.
///
/// Call at startup before creating the new log file.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    rotate_logs_in(&cache, chrono::Local::now());
}

fn rotate_logs_in(cache: &Path, now: chrono::DateTime<chrono::Local>) {
    let latest = cache.join(LATEST_LOG);
    if latest.exists() {
        let archived = cache.join(format!("{}.log", now.format("%Y%m%d_%H%M%S")));
        let _ = fs::rename(&latest, &archived);
    }
    cleanup_old_logs(cache, MAX_OLD_LOGS);
}

/// Keep only the `keep` most recently modified archived logs.
fn cleanup_old_logs(cache: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(cache) else { return };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    // oldest first
    logs.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());

    if logs.len() > keep {
        for entry in logs.iter().take(logs.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }
    }
}
