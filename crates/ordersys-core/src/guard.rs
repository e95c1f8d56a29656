//! Navigation guard

use ordersys_config::{AppConfig, RouteEntry};
use serde::Serialize;
use tracing::debug;

use crate::UserState;

/// Why a transition was sent somewhere else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    /// The matched route itself redirects
    Route,
    /// Route needs a login
    NotLoggedIn,
    /// Route needs administrator rights
    NotAdmin,
    /// Route is guest-only and the user is logged in
    AlreadyLoggedIn,
}

/// Outcome of evaluating the guard for one transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectTo {
        path: String,
        reason: RedirectReason,
    },
}

/// Decides whether a user may enter a route.
///
/// Rules are evaluated in order and the first match wins:
/// 1. login required and not logged in: go to the login path
/// 2. admin required and not an admin: go to the home path
/// 3. guest-only and logged in: go to the home path
/// 4. otherwise allow
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    login_path: String,
    home_path: String,
}

impl NavigationGuard {
    pub fn new(login_path: impl Into<String>, home_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            home_path: home_path.into(),
        }
    }

    pub fn from_app(app: &AppConfig) -> Self {
        Self::new(app.login_path.clone(), app.home_path.clone())
    }

    pub fn decide(&self, entry: &RouteEntry, user: &UserState) -> GuardDecision {
        let decision = if entry.requires_auth() && !user.is_logged_in() {
            redirect(&self.login_path, RedirectReason::NotLoggedIn)
        } else if entry.requires_admin() && !user.is_admin() {
            redirect(&self.home_path, RedirectReason::NotAdmin)
        } else if entry.requires_guest() && user.is_logged_in() {
            redirect(&self.home_path, RedirectReason::AlreadyLoggedIn)
        } else {
            GuardDecision::Allow
        };

        debug!(route = %entry.name, decision = ?decision, "Guard evaluated");
        decision
    }
}

fn redirect(path: &str, reason: RedirectReason) -> GuardDecision {
    GuardDecision::RedirectTo {
        path: path.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordersys_config::{Access, PathPattern, RouteTarget};
    use ordersys_store::MemoryStorage;
    use ordersys_util::{RouteName, ViewId};
    use std::sync::Arc;

    fn entry(access: Access) -> RouteEntry {
        RouteEntry {
            name: RouteName::new("Target"),
            pattern: PathPattern::parse("/target").unwrap(),
            target: RouteTarget::View(ViewId::new("TargetPage")),
            access,
        }
    }

    fn guard() -> NavigationGuard {
        NavigationGuard::new("/login", "/")
    }

    fn guest() -> UserState {
        UserState::load(Arc::new(MemoryStorage::new()))
    }

    fn member(is_admin: bool) -> UserState {
        let mut user = guest();
        user.set_login_state("tok", is_admin).unwrap();
        user
    }

    fn to(path: &str, reason: RedirectReason) -> GuardDecision {
        GuardDecision::RedirectTo {
            path: path.into(),
            reason,
        }
    }

    #[test]
    fn public_route_is_always_allowed() {
        let e = entry(Access::empty());
        assert_eq!(guard().decide(&e, &guest()), GuardDecision::Allow);
        assert_eq!(guard().decide(&e, &member(false)), GuardDecision::Allow);
        assert_eq!(guard().decide(&e, &member(true)), GuardDecision::Allow);
    }

    #[test]
    fn logged_out_user_goes_to_login() {
        let user = guest();

        let auth = entry(Access::REQUIRES_AUTH);
        assert_eq!(guard().decide(&auth, &user), to("/login", RedirectReason::NotLoggedIn));

        let admin = entry(Access::REQUIRES_AUTH | Access::REQUIRES_ADMIN);
        assert_eq!(guard().decide(&admin, &user), to("/login", RedirectReason::NotLoggedIn));
    }

    #[test]
    fn non_admin_goes_home_from_admin_routes() {
        let user = member(false);

        let admin = entry(Access::REQUIRES_AUTH | Access::REQUIRES_ADMIN);
        assert_eq!(guard().decide(&admin, &user), to("/", RedirectReason::NotAdmin));

        let auth = entry(Access::REQUIRES_AUTH);
        assert_eq!(guard().decide(&auth, &user), GuardDecision::Allow);
    }

    #[test]
    fn admin_may_enter_admin_routes() {
        let admin = entry(Access::REQUIRES_AUTH | Access::REQUIRES_ADMIN);
        assert_eq!(guard().decide(&admin, &member(true)), GuardDecision::Allow);
    }

    #[test]
    fn logged_in_user_leaves_guest_routes() {
        let login = entry(Access::REQUIRES_GUEST);

        assert_eq!(guard().decide(&login, &guest()), GuardDecision::Allow);
        assert_eq!(
            guard().decide(&login, &member(false)),
            to("/", RedirectReason::AlreadyLoggedIn)
        );
        assert_eq!(
            guard().decide(&login, &member(true)),
            to("/", RedirectReason::AlreadyLoggedIn)
        );
    }

    #[test]
    fn rule_order_is_auth_then_admin_then_guest() {
        // Inconsistent flag sets are rejected by validation, but the guard
        // still has a defined answer for them.
        let all = entry(Access::all());

        assert_eq!(guard().decide(&all, &guest()), to("/login", RedirectReason::NotLoggedIn));
        assert_eq!(guard().decide(&all, &member(false)), to("/", RedirectReason::NotAdmin));
        assert_eq!(
            guard().decide(&all, &member(true)),
            to("/", RedirectReason::AlreadyLoggedIn)
        );

        // Admin-only without the auth flag falls through to rule 2
        let admin_only = entry(Access::REQUIRES_ADMIN);
        assert_eq!(guard().decide(&admin_only, &guest()), to("/", RedirectReason::NotAdmin));
    }

    #[test]
    fn guard_uses_configured_paths() {
        let app = AppConfig {
            login_path: "/signin".into(),
            home_path: "/menu".into(),
            data_dir: None,
        };
        let guard = NavigationGuard::from_app(&app);

        let auth = entry(Access::REQUIRES_AUTH);
        assert_eq!(guard.decide(&auth, &guest()), to("/signin", RedirectReason::NotLoggedIn));

        let login = entry(Access::REQUIRES_GUEST);
        assert_eq!(
            guard.decide(&login, &member(false)),
            to("/menu", RedirectReason::AlreadyLoggedIn)
        );
    }
}
