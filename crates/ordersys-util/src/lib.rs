//! Shared utilities for ordersys
//!
//! This crate provides:
//! - ID types (FoodId, RouteName, ViewId)
//! - Error types
//! - Default paths for the route config and data directory

mod error;
mod ids;
mod paths;

pub use error::*;
pub use ids::*;
pub use paths::*;
