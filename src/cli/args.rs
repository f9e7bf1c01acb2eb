//! CLI argument definitions using clap
//!
//! Commands:
//! - newsdesk serve --config <path> [--port <port>] [--memory]
//! - newsdesk check-config --config <path>
//! - newsdesk endpoints

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// newsdesk - a REST backend for topics, articles, comments and users
#[derive(Parser, Debug)]
#[command(name = "newsdesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./newsdesk.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,

        /// Serve the bundled demo dataset from memory instead of PostgreSQL
        #[arg(long)]
        memory: bool,
    },

    /// Load and validate configuration, then print the effective result
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = "./newsdesk.json")]
        config: PathBuf,
    },

    /// Print the endpoint descriptor served at /api
    Endpoints,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags() {
        let cli = Cli::parse_from(["newsdesk", "serve", "--port", "8080", "--memory"]);
        match cli.command {
            Command::Serve { config, port, memory } => {
                assert_eq!(config, PathBuf::from("./newsdesk.json"));
                assert_eq!(port, Some(8080));
                assert!(memory);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_check_config_path() {
        let cli = Cli::parse_from(["newsdesk", "check-config", "--config", "/etc/newsdesk.json"]);
        assert!(matches!(
            cli.command,
            Command::CheckConfig { ref config } if config == &PathBuf::from("/etc/newsdesk.json")
        ));
    }
}
