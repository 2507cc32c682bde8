//! Subcommand implementations.

pub mod config;
pub mod errors;
pub mod helpers;
pub mod tabs;
pub mod typewriter;
