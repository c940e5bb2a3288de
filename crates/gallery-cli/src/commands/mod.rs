//! Command handlers, grouped by area.

pub mod codec;
pub mod init;
pub mod items;
pub mod maintenance;
pub mod misc;
pub mod tags;
