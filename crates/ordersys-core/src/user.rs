//! Logged-in user state

use ordersys_store::KeyValueStorage;
use ordersys_util::{OrderSysError, Result};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Storage key holding the auth token
pub const TOKEN_KEY: &str = "userToken";

/// Storage key holding the admin flag (`"true"` when set)
pub const ADMIN_KEY: &str = "isAdmin";

/// Authentication token and admin flag, mirrored to durable storage.
///
/// The token is opaque and never validated here. The in-memory values are
/// authoritative for the session; storage failures are logged, not returned.
pub struct UserState {
    token: Option<String>,
    is_admin: bool,
    storage: Arc<dyn KeyValueStorage>,
}

impl UserState {
    /// Initialize from durable storage.
    ///
    /// An admin flag stored without a token is ignored.
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        let token = match storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                None
            }
        };

        let stored_admin = match storage.get(ADMIN_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                warn!(error = %e, "Failed to read stored admin flag");
                false
            }
        };

        if stored_admin && token.is_none() {
            debug!("Ignoring stored admin flag without a token");
        }

        let is_admin = stored_admin && token.is_some();
        info!(logged_in = token.is_some(), is_admin, "User state loaded");

        Self {
            token,
            is_admin,
            storage,
        }
    }

    /// Record a successful login and persist it
    pub fn set_login_state(&mut self, token: impl Into<String>, is_admin: bool) -> Result<()> {
        let token = token.into();
        if token.is_empty() {
            return Err(OrderSysError::EmptyToken);
        }

        if let Err(e) = self.storage.set(TOKEN_KEY, &token) {
            warn!(error = %e, "Failed to persist token");
        }
        if let Err(e) = self.storage.set(ADMIN_KEY, if is_admin { "true" } else { "false" }) {
            warn!(error = %e, "Failed to persist admin flag");
        }

        self.token = Some(token);
        self.is_admin = is_admin;

        info!(is_admin, "Logged in");
        Ok(())
    }

    /// Clear the login and its persisted values. Safe to call when logged out.
    pub fn logout(&mut self) {
        for key in [TOKEN_KEY, ADMIN_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "Failed to remove persisted value");
            }
        }

        let was_logged_in = self.token.take().is_some();
        self.is_admin = false;

        if was_logged_in {
            info!("Logged out");
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Never true while logged out
    pub fn is_admin(&self) -> bool {
        self.is_admin && self.is_logged_in()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether the backing storage is currently usable
    pub fn storage_healthy(&self) -> bool {
        self.storage.is_healthy()
    }
}

impl fmt::Debug for UserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserState")
            .field("logged_in", &self.is_logged_in())
            .field("is_admin", &self.is_admin())
            .finish_non_exhaustive()
    }
}
