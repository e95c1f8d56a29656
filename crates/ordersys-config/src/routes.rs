//! Validated route table

use bitflags::bitflags;
use ordersys_util::{OrderSysError, RouteName, ViewId};
use std::path::PathBuf;
use tracing::trace;

use crate::schema::{RawAppConfig, RawConfig, RawRoute};
use crate::{ConfigError, ConfigResult, PathPattern, RouteParams, ValidationError};

bitflags! {
    /// Access requirements attached to a route
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Access: u8 {
        /// A login token must be present
        const REQUIRES_AUTH = 1 << 0;
        /// The user must be an administrator
        const REQUIRES_ADMIN = 1 << 1;
        /// Only reachable while logged out (login, register)
        const REQUIRES_GUEST = 1 << 2;
    }
}

impl Access {
    /// Guest-only and authenticated-only are mutually exclusive
    pub fn is_consistent(self) -> bool {
        !(self.contains(Access::REQUIRES_GUEST)
            && self.intersects(Access::REQUIRES_AUTH | Access::REQUIRES_ADMIN))
    }

    /// Admin routes always require a login as well
    pub(crate) fn from_raw(raw: &RawRoute) -> Self {
        let mut access = Access::empty();
        access.set(Access::REQUIRES_AUTH, raw.requires_auth || raw.requires_admin);
        access.set(Access::REQUIRES_ADMIN, raw.requires_admin);
        access.set(Access::REQUIRES_GUEST, raw.requires_guest);
        access
    }
}

/// What a matched route does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    /// Render a view
    View(ViewId),
    /// Navigate to another path instead
    Redirect(String),
}

/// A single entry in the route table
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub name: RouteName,
    pub pattern: PathPattern,
    pub target: RouteTarget,
    pub access: Access,
}

impl RouteEntry {
    pub fn view_id(&self) -> Option<&ViewId> {
        match &self.target {
            RouteTarget::View(view) => Some(view),
            RouteTarget::Redirect(_) => None,
        }
    }

    pub fn requires_auth(&self) -> bool {
        self.access.contains(Access::REQUIRES_AUTH)
    }

    pub fn requires_admin(&self) -> bool {
        self.access.contains(Access::REQUIRES_ADMIN)
    }

    pub fn requires_guest(&self) -> bool {
        self.access.contains(Access::REQUIRES_GUEST)
    }

    fn from_raw(raw: RawRoute) -> Result<Self, ValidationError> {
        let pattern = PathPattern::parse(&raw.path).map_err(|message| {
            ValidationError::InvalidPattern {
                route: raw.name.clone(),
                message,
            }
        })?;
        let access = Access::from_raw(&raw);
        let target = match (raw.view, raw.redirect) {
            (Some(view), None) => RouteTarget::View(ViewId::new(view)),
            (None, Some(to)) => RouteTarget::Redirect(to),
            _ => return Err(ValidationError::AmbiguousTarget(raw.name)),
        };

        Ok(Self {
            name: RouteName::new(raw.name),
            pattern,
            target,
            access,
        })
    }
}

/// Application-level settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Redirect target for routes that need a login
    pub login_path: String,
    /// Redirect target for admin-only and guest-only routes
    pub home_path: String,
    /// Data directory override
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    pub(crate) fn from_raw(raw: RawAppConfig) -> Self {
        Self {
            login_path: raw.login_path.unwrap_or_else(|| DEFAULT_LOGIN_PATH.into()),
            home_path: raw.home_path.unwrap_or_else(|| DEFAULT_HOME_PATH.into()),
            data_dir: raw.data_dir,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_raw(RawAppConfig::default())
    }
}

pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_HOME_PATH: &str = "/";

/// A route matched against a concrete path
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    pub entry: RouteEntry,
    pub params: RouteParams,
    /// The request path that was matched
    pub path: String,
}

impl ResolvedRoute {
    pub fn is_not_found(&self) -> bool {
        self.entry.pattern.is_catch_all()
    }
}

/// Validated, immutable route table
#[derive(Debug, Clone)]
pub struct RouteTable {
    /// Application settings
    pub app: AppConfig,

    /// Declared routes in match order, excluding the catch-all
    routes: Vec<RouteEntry>,

    /// Catch-all entry mapped to the not-found view
    not_found: RouteEntry,
}

impl RouteTable {
    /// Convert from raw config (after validation)
    pub(crate) fn from_raw(raw: RawConfig) -> ConfigResult<Self> {
        let mut routes = raw
            .routes
            .into_iter()
            .map(RouteEntry::from_raw)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ConfigError::ValidationFailed { errors: vec![e] })?;

        let not_found = match routes.pop() {
            Some(entry) if entry.pattern.is_root_catch_all() => entry,
            _ => {
                return Err(ConfigError::ValidationFailed {
                    errors: vec![ValidationError::MissingCatchAll],
                });
            }
        };

        Ok(Self {
            app: AppConfig::from_raw(raw.app),
            routes,
            not_found,
        })
    }

    /// Resolve a request path. First match wins; unmatched paths resolve
    /// to the catch-all entry.
    pub fn resolve(&self, path: &str) -> ResolvedRoute {
        let matched = self.routes.iter().find_map(|entry| {
            entry.pattern.matches(path).map(|params| (entry, params))
        });

        match matched {
            Some((entry, params)) => {
                trace!(path, route = %entry.name, "Route resolved");
                ResolvedRoute {
                    entry: entry.clone(),
                    params,
                    path: path.to_string(),
                }
            }
            None => self.not_found(path),
        }
    }

    /// Resolve `path` straight to the catch-all entry
    pub fn not_found(&self, path: &str) -> ResolvedRoute {
        trace!(path, "No route matched");
        ResolvedRoute {
            entry: self.not_found.clone(),
            params: self.not_found.pattern.matches(path).unwrap_or_default(),
            path: path.to_string(),
        }
    }

    /// Get entry by route name
    pub fn get(&self, name: &RouteName) -> Option<&RouteEntry> {
        self.entries().find(|e| &e.name == name)
    }

    /// Build the concrete path of a named route
    pub fn path_for(&self, name: &RouteName, params: &RouteParams) -> ordersys_util::Result<String> {
        let entry = self
            .get(name)
            .ok_or_else(|| OrderSysError::route_not_found(name.clone()))?;

        entry
            .pattern
            .build(params)
            .map_err(|param| OrderSysError::missing_param(name.clone(), param))
    }

    /// All entries in match order, catch-all last
    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry> {
        self.routes.iter().chain(std::iter::once(&self.not_found))
    }

    pub fn len(&self) -> usize {
        self.routes.len() + 1
    }

    /// A table always holds at least the catch-all
    pub fn is_empty(&self) -> bool {
        false
    }
}
