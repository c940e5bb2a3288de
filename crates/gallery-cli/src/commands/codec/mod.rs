//! Envelope commands: seal, open, fetch.

pub mod fetch;
pub mod open;
pub mod seal;

pub use fetch::handle_fetch;
pub use open::handle_open;
pub use seal::handle_seal;
