//! CLI module for newsdesk
//!
//! Provides command-line interface for:
//! - serve: Connect the store and serve the HTTP API
//! - check-config: Validate a configuration file
//! - endpoints: Print the API descriptor

mod args;
mod commands;
pub mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check_config, run, run_command, serve};
pub use config::AppConfig;
pub use errors::{CliError, CliErrorCode, CliResult};
