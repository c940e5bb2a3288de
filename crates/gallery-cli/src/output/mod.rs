//! Output rendering split by destination: `json` for machine consumers,
//! `text` for the terminal.

pub mod json;
pub mod text;
