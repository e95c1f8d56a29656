//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Application-level settings
    #[serde(default)]
    pub app: RawAppConfig,

    /// Routes, in match order
    #[serde(default)]
    pub routes: Vec<RawRoute>,
}

/// Application-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawAppConfig {
    /// Where unauthenticated users are sent (default: /login)
    pub login_path: Option<String>,

    /// Where users without sufficient rights are sent (default: /)
    pub home_path: Option<String>,

    /// Data directory for the key-value database
    pub data_dir: Option<PathBuf>,
}

/// Raw route definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawRoute {
    /// Path pattern, e.g. `/orders/:id` or `/*path`
    pub path: String,

    /// Unique route name
    pub name: String,

    /// View rendered for this route
    pub view: Option<String>,

    /// Path this route redirects to instead of rendering a view
    pub redirect: Option<String>,

    #[serde(default)]
    pub requires_auth: bool,

    /// Implies `requires_auth`
    #[serde(default)]
    pub requires_admin: bool,

    /// Only reachable while logged out
    #[serde(default)]
    pub requires_guest: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_view_route() {
        let toml_str = r#"
            config_version = 1

            [[routes]]
            path = "/orders/:id"
            name = "OrderDetail"
            view = "OrderDetailPage"
            requires_auth = true
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.routes[0].name, "OrderDetail");
        assert!(config.routes[0].requires_auth);
        assert!(!config.routes[0].requires_admin);
        assert!(config.routes[0].redirect.is_none());
    }

    #[test]
    fn parse_app_section() {
        let toml_str = r#"
            config_version = 1

            [app]
            login_path = "/signin"
            data_dir = "/var/lib/ordersys"

            [[routes]]
            path = "/"
            name = "Home"
            redirect = "/menu"
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.app.login_path.as_deref(), Some("/signin"));
        assert!(config.app.home_path.is_none());
        assert_eq!(config.routes[0].redirect.as_deref(), Some("/menu"));
    }
}
