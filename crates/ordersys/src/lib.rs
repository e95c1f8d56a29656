//! Host shell for the ordersys client core
//!
//! Decodes JSON commands and applies them to a [`Shell`], which owns the
//! navigator, user state and cart for the lifetime of the process.

mod command;
mod shell;

pub use command::*;
pub use shell::*;
