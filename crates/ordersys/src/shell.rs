//! Command execution against the client context

use ordersys_config::{RouteParams, RouteTable, RouteTarget};
use ordersys_core::{CartState, CartSummary, Navigation, Navigator, Redirect, UserState};
use ordersys_store::KeyValueStorage;
use ordersys_util::{RouteName, ViewId};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::Command;

/// Output of one command, printed as a JSON line
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    /// The view now on screen
    View {
        path: String,
        route: RouteName,
        view: Option<ViewId>,
        params: RouteParams,
        redirects: Vec<Redirect>,
    },
    /// `back` or `forward` with nothing to move to
    NoHistory { direction: &'static str },
    Cart(CartSummary),
    User {
        logged_in: bool,
        is_admin: bool,
        storage_healthy: bool,
    },
    Routes { routes: Vec<RouteInfo> },
    Error { message: String },
    Bye,
}

impl Reply {
    pub fn error(message: impl ToString) -> Self {
        Reply::Error {
            message: message.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error { .. })
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Reply::Bye)
    }
}

impl From<Navigation> for Reply {
    fn from(nav: Navigation) -> Self {
        Reply::View {
            view: nav.view_id().cloned(),
            path: nav.route.path,
            route: nav.route.entry.name,
            params: nav.route.params,
            redirects: nav.redirects,
        }
    }
}

/// One row of the `routes` listing
#[derive(Debug, Clone, Serialize)]
pub struct RouteInfo {
    pub name: RouteName,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    pub requires_auth: bool,
    pub requires_admin: bool,
    pub requires_guest: bool,
}

/// The client context: one navigator, one user, one cart
#[derive(Debug)]
pub struct Shell {
    navigator: Navigator,
    user: UserState,
    cart: CartState,
}

impl Shell {
    pub fn new(routes: Arc<RouteTable>, storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            navigator: Navigator::new(routes),
            user: UserState::load(storage),
            cart: CartState::new(),
        }
    }

    /// Enter the initial path
    pub fn start(&mut self, path: &str) -> Reply {
        self.navigator.push(path, &self.user).into()
    }

    /// Decode and run one JSON request line
    pub fn handle_line(&mut self, line: &str) -> Reply {
        match serde_json::from_str::<Command>(line) {
            Ok(command) => {
                debug!(command = ?command, "Command received");
                self.execute(command)
            }
            Err(e) => {
                warn!(error = %e, "Invalid request");
                Reply::error(format!("Invalid request: {e}"))
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> Reply {
        match command {
            Command::Go { path } => self.navigator.push(&path, &self.user).into(),

            Command::Open { name, params } => {
                match self.navigator.push_named(&name, &params, &self.user) {
                    Ok(nav) => nav.into(),
                    Err(e) => Reply::error(e),
                }
            }

            Command::Back => match self.navigator.back(&self.user) {
                Some(nav) => nav.into(),
                None => Reply::NoHistory { direction: "back" },
            },

            Command::Forward => match self.navigator.forward(&self.user) {
                Some(nav) => nav.into(),
                None => Reply::NoHistory {
                    direction: "forward",
                },
            },

            Command::Login { token, admin } => {
                if let Err(e) = self.user.set_login_state(token, admin) {
                    warn!(error = %e, "Login rejected");
                    return Reply::error(e);
                }
                self.refresh()
            }

            Command::Logout => {
                self.user.logout();
                self.refresh()
            }

            Command::Add { item } => {
                self.cart.add_item(item);
                self.cart_reply()
            }

            Command::Remove { id } => {
                self.cart.remove_item(id);
                self.cart_reply()
            }

            Command::Increment { id } => {
                self.cart.increment(id);
                self.cart_reply()
            }

            Command::Decrement { id } => {
                self.cart.decrement(id);
                self.cart_reply()
            }

            Command::SetQuantity { id, quantity } => {
                self.cart.set_quantity(id, quantity);
                self.cart_reply()
            }

            Command::Clear => {
                self.cart.clear();
                self.cart_reply()
            }

            Command::Cart => self.cart_reply(),

            Command::WhoAmI => self.user_reply(),

            Command::Routes => Reply::Routes {
                routes: self
                    .navigator
                    .routes()
                    .entries()
                    .map(|entry| {
                        let (view, redirect) = match &entry.target {
                            RouteTarget::View(view) => (Some(view.clone()), None),
                            RouteTarget::Redirect(to) => (None, Some(to.clone())),
                        };
                        RouteInfo {
                            name: entry.name.clone(),
                            path: entry.pattern.to_string(),
                            view,
                            redirect,
                            requires_auth: entry.requires_auth(),
                            requires_admin: entry.requires_admin(),
                            requires_guest: entry.requires_guest(),
                        }
                    })
                    .collect(),
            },

            Command::Quit => Reply::Bye,
        }
    }

    pub fn user(&self) -> &UserState {
        &self.user
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Re-run the guard on the current view after the login changed
    fn refresh(&mut self) -> Reply {
        match self.navigator.refresh(&self.user) {
            Some(nav) => nav.into(),
            None => self.user_reply(),
        }
    }

    fn cart_reply(&self) -> Reply {
        Reply::Cart(self.cart.summary())
    }

    fn user_reply(&self) -> Reply {
        Reply::User {
            logged_in: self.user.is_logged_in(),
            is_admin: self.user.is_admin(),
            storage_healthy: self.user.storage_healthy(),
        }
    }
}
