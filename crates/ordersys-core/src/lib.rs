//! Core client logic for ordersys
//!
//! This crate contains:
//! - The navigation guard (ordered allow/redirect rules over route access flags)
//! - The navigator (route resolution, redirects, back/forward history)
//! - User state mirrored to durable key-value storage
//! - The in-memory shopping cart with derived totals
//!
//! State lives in plain context objects that the host constructs once and
//! passes by reference; nothing here is global.

mod cart;
mod guard;
mod navigator;
mod user;

pub use cart::*;
pub use guard::*;
pub use navigator::*;
pub use user::*;
