//! CLI subcommands.

pub mod common;
pub mod complete;
pub mod config;
pub mod projects;
pub mod skeleton;
pub mod volume;
