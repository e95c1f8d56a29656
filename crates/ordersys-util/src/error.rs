//! Error types for ordersys

use thiserror::Error;

use crate::RouteName;

/// Core error type for ordersys operations
#[derive(Debug, Error)]
pub enum OrderSysError {
    #[error("Login token must not be empty")]
    EmptyToken,

    #[error("Route not found: {0}")]
    RouteNotFound(RouteName),

    #[error("Route '{route}' needs parameter '{param}'")]
    MissingParam { route: RouteName, param: String },
}

impl OrderSysError {
    pub fn route_not_found(name: impl Into<RouteName>) -> Self {
        Self::RouteNotFound(name.into())
    }

    pub fn missing_param(route: RouteName, param: impl Into<String>) -> Self {
        Self::MissingParam {
            route,
            param: param.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OrderSysError>;
