//! Default paths for ordersys components
//!
//! Paths are user-writable by default:
//! - Route config: `$XDG_CONFIG_HOME/ordersys/routes.toml` or `~/.config/ordersys/routes.toml`
//! - Data: `$XDG_DATA_HOME/ordersys` or `~/.local/share/ordersys`

use std::path::PathBuf;

/// Environment variable for overriding the route config path
pub const ORDERSYS_CONFIG_ENV: &str = "ORDERSYS_CONFIG";

/// Environment variable for overriding the data directory
pub const ORDERSYS_DATA_DIR_ENV: &str = "ORDERSYS_DATA_DIR";

/// Route config filename within the config directory
const CONFIG_FILENAME: &str = "routes.toml";

/// SQLite filename within the data directory
pub const DATABASE_FILENAME: &str = "ordersys.db";

/// Application subdirectory name
const APP_DIR: &str = "ordersys";

/// Get the default route config path.
///
/// Order of precedence:
/// 1. `$ORDERSYS_CONFIG` environment variable (if set)
/// 2. `$XDG_CONFIG_HOME/ordersys/routes.toml` (if XDG_CONFIG_HOME is set)
/// 3. `~/.config/ordersys/routes.toml` (fallback)
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(ORDERSYS_CONFIG_ENV) {
        return PathBuf::from(path);
    }

    config_path_without_env()
}

/// Get the config path without checking the ORDERSYS_CONFIG env var.
pub fn config_path_without_env() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join(CONFIG_FILENAME);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILENAME);
    }

    PathBuf::from("/tmp").join(APP_DIR).join(CONFIG_FILENAME)
}

/// Get the default data directory.
///
/// Order of precedence:
/// 1. `$ORDERSYS_DATA_DIR` environment variable (if set)
/// 2. `$XDG_DATA_HOME/ordersys` (if XDG_DATA_HOME is set)
/// 3. `~/.local/share/ordersys` (fallback)
pub fn default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var(ORDERSYS_DATA_DIR_ENV) {
        return PathBuf::from(path);
    }

    data_dir_without_env()
}

/// Get the data directory without checking the ORDERSYS_DATA_DIR env var.
/// Used for default values in configs where the env var is checked separately.
pub fn data_dir_without_env() -> PathBuf {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR).join("data")
}
