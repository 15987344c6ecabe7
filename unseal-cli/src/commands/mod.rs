//! Subcommand implementations.

pub mod check;
pub mod check_dir;
pub mod filter;
pub mod remove;
