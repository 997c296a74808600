//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Push notification relay
#[derive(Parser, Debug)]
#[command(name = "push-relay")]
#[command(about = "Relays push notifications to Firebase Cloud Messaging")]
#[command(long_about = "
push-relay accepts notification requests over HTTP or from the command line,
forwards each one to Firebase Cloud Messaging and logs the outcome. It also
serves the browser background worker and renders pushed payloads as desktop
notifications.

EXAMPLES:
    # Start the server with default configuration
    push-relay serve

    # Start server on custom host and port
    push-relay serve --host 0.0.0.0 --port 8080

    # Check configuration and credentials without starting the server
    push-relay serve --dry-run

    # Send one notification from the shell
    push-relay send <token> \"Hello\" \"World\"

    # Render payloads piped from another process
    some-producer | push-relay receive

For more information about configuration options, see config/default.toml.
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load a single TOML file instead of the layered `config/` directory.
    /// The file must exist and be readable.
    ///
    /// Example: --config /etc/push-relay/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects the `{environment}.toml` overlay instead of `RELAY_APP_ENV`.
    ///
    /// Available values: development (dev), test, staging (stage), production (prod)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Increases log output to debug level. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Reduces log output to error level only. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    ///
    /// Loads the service-account key, then serves the dispatch endpoint,
    /// the browser worker script and the health probes.
    ///
    /// Examples:
    ///   push-relay serve                           # Start with defaults
    ///   push-relay serve --host 0.0.0.0 --port 80  # Bind to all interfaces on port 80
    ///   push-relay serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        ///
        /// Use 127.0.0.1 for localhost only, or 0.0.0.0 to accept connections
        /// from any interface.
        ///
        /// Default: 127.0.0.1
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Must be between 1 and 65535.
        ///
        /// Default: 3000
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Overrides both configuration file settings and global --verbose/--quiet flags.
        ///
        /// Available levels: error, warn, info, debug, trace
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and credentials, then exit
        ///
        /// Returns exit code 0 if valid, non-zero if invalid. No network
        /// calls are made.
        #[arg(long)]
        dry_run: bool,
    },
    /// Send one notification
    ///
    /// Takes exactly three arguments. Anything else prints the usage line and
    /// exits with code 1. A provider failure is logged; the exit code stays 0.
    ///
    /// Example:
    ///   push-relay send <token> "Hello" "World"
    Send {
        /// Recipient token, title and body
        #[arg(
            value_name = "TOKEN TITLE BODY",
            num_args = 0..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        args: Vec<String>,
    },
    /// Render pushed payloads as desktop notifications
    ///
    /// Reads one JSON payload per line from stdin (or --input) until end of
    /// input. Lines that are not valid payloads are logged and skipped.
    Receive {
        /// Read payloads from a file instead of stdin
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Log notifications instead of showing them on the desktop
        #[arg(long)]
        print_only: bool,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Validate argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        if let Some(Commands::Receive {
            input: Some(path), ..
        }) = &self.command
            && !path.is_file()
        {
            return Err(format!("Input file does not exist: '{}'", path.display()));
        }

        Ok(())
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["push-relay", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["push-relay"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
    }

    #[test]
    fn test_serve_command() {
        let cli = Cli::try_parse_from(["push-relay", "serve", "--host", "0.0.0.0", "--port", "8080"])
            .unwrap();
        let Some(Commands::Serve {
            host,
            port,
            dry_run,
            ..
        }) = cli.command
        else {
            panic!("Expected Serve command");
        };
        assert_eq!(host.as_deref(), Some("0.0.0.0"));
        assert_eq!(port, Some(8080));
        assert!(!dry_run);
    }

    #[test]
    fn test_send_accepts_any_argument_count() {
        let cli = Cli::try_parse_from(["push-relay", "send", "onlyone"]).unwrap();
        let Some(Commands::Send { args }) = cli.command else {
            panic!("Expected Send command");
        };
        assert_eq!(args, vec!["onlyone".to_string()]);

        let cli = Cli::try_parse_from(["push-relay", "send", "tok", "-5 degrees", "Brr"]).unwrap();
        let Some(Commands::Send { args }) = cli.command else {
            panic!("Expected Send command");
        };
        assert_eq!(args.len(), 3);
        assert_eq!(args[1], "-5 degrees");
    }

    #[test]
    fn test_receive_command() {
        let cli = Cli::try_parse_from(["push-relay", "receive", "--print-only"]).unwrap();
        let Some(Commands::Receive { input, print_only }) = cli.command else {
            panic!("Expected Receive command");
        };
        assert!(input.is_none());
        assert!(print_only);
    }

    #[test]
    fn test_environment_alias() {
        let cli = Cli::try_parse_from(["push-relay", "--env", "stage"]).unwrap();
        assert!(matches!(cli.env, Some(Environment::Staging)));
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["push-relay", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_validate_missing_input_file() {
        let cli = Cli::try_parse_from([
            "push-relay",
            "receive",
            "--input",
            "/definitely/not/here.jsonl",
        ])
        .unwrap();
        assert!(cli.validate().is_err());
    }
}
