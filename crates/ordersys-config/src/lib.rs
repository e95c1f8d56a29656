//! Route table configuration for ordersys
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - Routes with path patterns, views or redirects, and access flags
//! - Validation with clear error messages
//! - A built-in table for the food-ordering client

mod pattern;
mod routes;
mod schema;
mod validation;

pub use pattern::*;
pub use routes::*;
pub use schema::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Route table shipped with the client
pub const DEFAULT_ROUTES_TOML: &str = include_str!("default_routes.toml");

/// Load and validate a route table from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<RouteTable> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate a route table from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<RouteTable> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    let table = RouteTable::from_raw(raw)?;
    debug!(route_count = table.len(), "Route table loaded");
    Ok(table)
}

/// The built-in food-ordering route table
pub fn default_route_table() -> ConfigResult<RouteTable> {
    parse_config(DEFAULT_ROUTES_TOML)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordersys_util::{RouteName, ViewId};
    use std::io::Write;

    #[test]
    fn parse_minimal_config() {
        let config = r#"
            config_version = 1

            [[routes]]
            path = "/login"
            name = "Login"
            view = "LoginForm"

            [[routes]]
            path = "/*path"
            name = "NotFound"
            view = "NotFound"
        "#;

        // home_path defaults to "/", which this table does not declare
        let result = parse_config(config);
        assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));

        let config = format!("{config}\n[app]\nhome_path = \"/login\"\n");
        let table = parse_config(&config).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.app.home_path, "/login");
    }

    #[test]
    fn reject_wrong_version() {
        let config = r#"
            config_version = 99
        "#;

        let result = parse_config(config);
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn default_table_is_valid() {
        let table = default_route_table().unwrap();

        assert_eq!(table.len(), 12);
        assert_eq!(table.app.login_path, "/login");
        assert_eq!(table.app.home_path, "/");

        let create_food = table.get(&RouteName::new("CreateFood")).unwrap();
        assert!(create_food.requires_auth() && create_food.requires_admin());

        let login = table.get(&RouteName::new("Login")).unwrap();
        assert!(login.requires_guest());
    }

    #[test]
    fn default_table_routes() {
        let table = default_route_table().unwrap();

        let resolved = table.resolve("/food/3");
        assert_eq!(resolved.entry.view_id(), Some(&ViewId::new("FoodDetailPage")));
        assert_eq!(resolved.params.get("id"), Some("3"));

        let resolved = table.resolve("/pay/88");
        assert_eq!(resolved.params.get("orderId"), Some("88"));

        assert!(table.resolve("/admin").is_not_found());
        assert!(table.resolve("/menu/specials").is_not_found());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DEFAULT_ROUTES_TOML.as_bytes()).unwrap();

        let table = load_config(file.path()).unwrap();
        assert_eq!(table.len(), 12);
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
