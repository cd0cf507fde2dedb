//! CLI module - argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod table;
pub mod viz;

pub use args::{Cli, Commands};
