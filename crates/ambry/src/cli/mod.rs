//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the ambry binary.

mod commands;
mod handlers;

pub use commands::{Cli, Commands, ListFormat};
pub use handlers::handle_command;
