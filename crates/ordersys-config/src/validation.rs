//! Configuration validation

use crate::schema::{RawConfig, RawRoute};
use crate::{Access, DEFAULT_HOME_PATH, DEFAULT_LOGIN_PATH, PathPattern};
use std::collections::HashSet;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Route '{route}': invalid pattern: {message}")]
    InvalidPattern { route: String, message: String },

    #[error("Duplicate route name: {0}")]
    DuplicateRouteName(String),

    #[error("Route '{0}' must have exactly one of `view` or `redirect`")]
    AmbiguousTarget(String),

    #[error("Route '{0}' cannot be both guest-only and login-only")]
    ConflictingAccess(String),

    #[error("Redirect route '{0}' cannot carry access requirements")]
    GuardedRedirect(String),

    #[error("Route table needs a catch-all route (e.g. `/*path`) as its last entry")]
    MissingCatchAll,

    #[error("Catch-all route '{0}' must be the last entry")]
    MisplacedCatchAll(String),

    #[error("Catch-all route '{0}' must match every path (e.g. `/*path`)")]
    PrefixedCatchAll(String),

    #[error("Route '{route}' redirects to '{target}', which matches no route")]
    UnknownRedirectTarget { route: String, target: String },

    #[error("Redirect cycle through route '{0}'")]
    RedirectCycle(String),

    #[error("{setting} '{path}' must lead to a declared route its redirected users can enter")]
    GuardedFallback { setting: &'static str, path: String },
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Check for duplicate route names
    let mut seen_names = HashSet::new();
    for route in &config.routes {
        if !seen_names.insert(&route.name) {
            errors.push(ValidationError::DuplicateRouteName(route.name.clone()));
        }
    }

    let patterns: Vec<Option<PathPattern>> = config
        .routes
        .iter()
        .map(|route| match PathPattern::parse(&route.path) {
            Ok(pattern) => Some(pattern),
            Err(message) => {
                errors.push(ValidationError::InvalidPattern {
                    route: route.name.clone(),
                    message,
                });
                None
            }
        })
        .collect();

    for route in &config.routes {
        errors.extend(validate_route(route));
    }

    // Exactly one catch-all, declared last
    let last = config.routes.len().saturating_sub(1);
    let mut has_catch_all = false;
    for (i, (route, pattern)) in config.routes.iter().zip(&patterns).enumerate() {
        let Some(pattern) = pattern.as_ref().filter(|p| p.is_catch_all()) else {
            continue;
        };
        if i != last {
            errors.push(ValidationError::MisplacedCatchAll(route.name.clone()));
            continue;
        }
        if !pattern.is_root_catch_all() {
            errors.push(ValidationError::PrefixedCatchAll(route.name.clone()));
        }
        has_catch_all = true;
    }
    if !has_catch_all {
        errors.push(ValidationError::MissingCatchAll);
    }

    // Redirects and fallback paths can only be checked on a well-formed table
    if errors.is_empty() {
        let table = Lookup {
            routes: &config.routes,
            patterns: patterns.into_iter().flatten().collect(),
        };
        errors.extend(table.validate_redirects());
        // Logged-out users land on the login path
        errors.extend(table.validate_fallback(
            "login_path",
            config.app.login_path.as_deref().unwrap_or(DEFAULT_LOGIN_PATH),
            |r| r.requires_auth || r.requires_admin,
        ));
        // Logged-in users without admin rights land on the home path
        errors.extend(table.validate_fallback(
            "home_path",
            config.app.home_path.as_deref().unwrap_or(DEFAULT_HOME_PATH),
            |r| r.requires_admin || r.requires_guest,
        ));
    }

    errors
}

fn validate_route(route: &RawRoute) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if route.view.is_some() == route.redirect.is_some() {
        errors.push(ValidationError::AmbiguousTarget(route.name.clone()));
    }

    if !Access::from_raw(route).is_consistent() {
        errors.push(ValidationError::ConflictingAccess(route.name.clone()));
    }

    if route.redirect.is_some() && (route.requires_auth || route.requires_admin || route.requires_guest)
    {
        errors.push(ValidationError::GuardedRedirect(route.name.clone()));
    }

    errors
}

/// Minimal first-match resolver over a raw table with parsed patterns
struct Lookup<'a> {
    routes: &'a [RawRoute],
    patterns: Vec<PathPattern>,
}

impl Lookup<'_> {
    /// Index of the first route matching `path`, if it is not the catch-all
    fn find(&self, path: &str) -> Option<usize> {
        self.patterns
            .iter()
            .position(|p| p.matches(path).is_some())
            .filter(|&i| !self.patterns[i].is_catch_all())
    }

    /// Follow redirect routes from `start`, returning the final view route.
    /// `Err` carries the index of the route that failed.
    fn follow(&self, start: usize) -> Result<usize, (usize, FollowError)> {
        let mut visited = HashSet::new();
        let mut current = start;

        while let Some(target) = &self.routes[current].redirect {
            if !visited.insert(current) {
                return Err((current, FollowError::Cycle));
            }
            current = match self.find(target) {
                Some(next) => next,
                None => return Err((current, FollowError::Unknown(target.clone()))),
            };
        }

        Ok(current)
    }

    fn validate_redirects(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut reported = HashSet::new();

        for (i, route) in self.routes.iter().enumerate() {
            if route.redirect.is_none() {
                continue;
            }
            if let Err((at, err)) = self.follow(i) {
                // Each broken route is reported once, even if many chains pass through it
                if !reported.insert(at) {
                    continue;
                }
                let name = self.routes[at].name.clone();
                errors.push(match err {
                    FollowError::Cycle => ValidationError::RedirectCycle(name),
                    FollowError::Unknown(target) => {
                        ValidationError::UnknownRedirectTarget { route: name, target }
                    }
                });
            }
        }

        errors
    }

    fn validate_fallback(
        &self,
        setting: &'static str,
        path: &str,
        blocked: impl Fn(&RawRoute) -> bool,
    ) -> Option<ValidationError> {
        let reachable = self
            .find(path)
            .and_then(|i| self.follow(i).ok())
            .is_some_and(|i| !blocked(&self.routes[i]));

        if reachable {
            None
        } else {
            Some(ValidationError::GuardedFallback {
                setting,
                path: path.to_string(),
            })
        }
    }
}

enum FollowError {
    Cycle,
    Unknown(String),
}
