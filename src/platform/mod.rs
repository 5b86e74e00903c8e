// Labelmarks platform paths
// Config and data directories for Linux, macOS and Windows, chosen at compile
// time with `cfg(target_os)`.

use std::env;
use std::path::PathBuf;

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const APP_DIR_UNIX: &str = "labelmarks";
#[cfg(any(target_os = "macos", target_os = "windows"))]
const APP_DIR: &str = "Labelmarks";

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Directory holding `settings.json`.
///
/// - **Linux**: `$XDG_CONFIG_HOME/labelmarks` or `~/.config/labelmarks`
/// - **macOS**: `~/Library/Application Support/Labelmarks`
/// - **Windows**: `%APPDATA%/Labelmarks`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join(APP_DIR)
    }
    #[cfg(target_os = "windows")]
    {
        appdata_dir().join(APP_DIR)
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR_UNIX)
    }
}

/// Directory holding the cache database.
///
/// - **Linux**: `$XDG_DATA_HOME/labelmarks` or `~/.local/share/labelmarks`
/// - **macOS**: `~/Library/Application Support/Labelmarks`
/// - **Windows**: `%APPDATA%/Labelmarks`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join(APP_DIR)
    }
    #[cfg(target_os = "windows")]
    {
        appdata_dir().join(APP_DIR)
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_dir("XDG_DATA_HOME", &[".local", "share"]).join(APP_DIR_UNIX)
    }
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn xdg_dir(var: &str, fallback: &[&str]) -> PathBuf {
    match env::var(var) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => fallback.iter().fold(home_dir(), |path, part| path.join(part)),
    }
}

#[cfg(target_os = "windows")]
fn appdata_dir() -> PathBuf {
    env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join("AppData").join("Roaming"))
}
