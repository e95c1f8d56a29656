//! Route transitions and history

use ordersys_config::{ResolvedRoute, RouteParams, RouteTable, RouteTarget};
use ordersys_util::{RouteName, ViewId};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{GuardDecision, NavigationGuard, RedirectReason, UserState};

/// Upper bound on redirects followed for a single transition
pub const MAX_REDIRECTS: usize = 16;

/// One hop taken while resolving a transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub from: String,
    pub to: String,
    pub reason: RedirectReason,
}

/// Result of a completed transition: the view to render and how we got there
#[derive(Debug, Clone)]
pub struct Navigation {
    pub route: ResolvedRoute,
    pub redirects: Vec<Redirect>,
}

impl Navigation {
    /// Final path that was entered
    pub fn path(&self) -> &str {
        &self.route.path
    }

    pub fn view_id(&self) -> Option<&ViewId> {
        self.route.entry.view_id()
    }

    pub fn params(&self) -> &RouteParams {
        &self.route.params
    }

    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Resolves paths against the route table, applies the guard to every
/// transition, and keeps back/forward history.
///
/// User state is passed in per call rather than owned.
#[derive(Debug)]
pub struct Navigator {
    routes: Arc<RouteTable>,
    guard: NavigationGuard,
    history: Vec<String>,
    position: Option<usize>,
}

impl Navigator {
    pub fn new(routes: Arc<RouteTable>) -> Self {
        let guard = NavigationGuard::from_app(&routes.app);
        Self {
            routes,
            guard,
            history: Vec::new(),
            position: None,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Navigate to `path`, adding a history entry
    pub fn push(&mut self, path: &str, user: &UserState) -> Navigation {
        let nav = self.transition(path, user);

        let next = self.position.map_or(0, |p| p + 1);
        self.history.truncate(next);
        self.history.push(nav.path().to_string());
        self.position = Some(next);

        nav
    }

    /// Navigate to a named route
    pub fn push_named(
        &mut self,
        name: &RouteName,
        params: &RouteParams,
        user: &UserState,
    ) -> ordersys_util::Result<Navigation> {
        let path = self.routes.path_for(name, params)?;
        Ok(self.push(&path, user))
    }

    /// Navigate to `path`, replacing the current history entry
    pub fn replace(&mut self, path: &str, user: &UserState) -> Navigation {
        let nav = self.transition(path, user);

        match self.position {
            Some(p) => self.history[p] = nav.path().to_string(),
            None => {
                self.history.push(nav.path().to_string());
                self.position = Some(0);
            }
        }

        nav
    }

    /// Step back one history entry, re-running the guard
    pub fn back(&mut self, user: &UserState) -> Option<Navigation> {
        let target = self.position?.checked_sub(1)?;
        Some(self.revisit(target, user))
    }

    /// Step forward one history entry, re-running the guard
    pub fn forward(&mut self, user: &UserState) -> Option<Navigation> {
        let target = self.position? + 1;
        if target >= self.history.len() {
            return None;
        }
        Some(self.revisit(target, user))
    }

    /// Re-evaluate the current entry, e.g. after login or logout
    pub fn refresh(&mut self, user: &UserState) -> Option<Navigation> {
        let current = self.position?;
        Some(self.revisit(current, user))
    }

    /// Path of the current history entry
    pub fn current(&self) -> Option<&str> {
        self.position.map(|p| self.history[p].as_str())
    }

    pub fn can_go_back(&self) -> bool {
        self.position.is_some_and(|p| p > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        self.position.is_some_and(|p| p + 1 < self.history.len())
    }

    fn revisit(&mut self, index: usize, user: &UserState) -> Navigation {
        let path = self.history[index].clone();
        let nav = self.transition(&path, user);

        // A redirected revisit overwrites the slot it landed on
        self.history[index] = nav.path().to_string();
        self.position = Some(index);

        nav
    }

    /// Resolve `path`, following route redirects and guard decisions until
    /// a view is allowed.
    fn transition(&self, path: &str, user: &UserState) -> Navigation {
        let mut redirects = Vec::new();
        let mut current = path.to_string();

        loop {
            let resolved = self.routes.resolve(&current);

            let (to, reason) = match &resolved.entry.target {
                RouteTarget::Redirect(to) => (to.clone(), RedirectReason::Route),
                RouteTarget::View(_) => match self.guard.decide(&resolved.entry, user) {
                    GuardDecision::Allow => {
                        info!(
                            path = %current,
                            route = %resolved.entry.name,
                            redirects = redirects.len(),
                            "Navigated"
                        );
                        return Navigation {
                            route: resolved,
                            redirects,
                        };
                    }
                    GuardDecision::RedirectTo { path, reason } => (path, reason),
                },
            };

            if redirects.len() == MAX_REDIRECTS {
                break;
            }

            debug!(from = %current, to = %to, reason = ?reason, "Redirecting");
            redirects.push(Redirect {
                from: std::mem::replace(&mut current, to.clone()),
                to,
                reason,
            });
        }

        warn!(
            path,
            limit = MAX_REDIRECTS,
            "Redirect limit exceeded, showing not-found view"
        );
        Navigation {
            route: self.routes.not_found(&current),
            redirects,
        }
    }
}
