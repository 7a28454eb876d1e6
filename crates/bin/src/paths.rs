//! Default file locations.
//!
//! Uses platform-specific directories:
//! - Linux: `~/.local/share/betaculator/prices/`, `~/.config/betaculator/indices.json`
//! - macOS: `~/Library/Application Support/betaculator/...`
//! - Windows: `%APPDATA%\betaculator\...`

use std::path::PathBuf;

/// Default directory of `<SYMBOL>.csv` price files.
pub(crate) fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("betaculator")
        .join("prices")
}

/// Default market index table location.
pub(crate) fn default_index_table_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("betaculator")
        .join("indices.json")
}

/// Index table to load: the explicit path, else the default one if it exists.
pub(crate) fn index_table_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        let path = default_index_table_path();
        path.is_file().then_some(path)
    })
}
