//! Maintenance commands.

pub mod check;

pub use check::handle_check;
