//! CLI operations

pub mod clean;
pub mod init;
pub mod list;
pub mod render;
pub mod show;
