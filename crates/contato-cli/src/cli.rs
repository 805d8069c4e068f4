//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Backend;

/// Contato - contact-form intake service
#[derive(Parser, Debug)]
#[command(name = "contato", version)]
#[command(about = "Contact-form intake service with swappable storage backends", long_about = None)]
pub struct Args {
    /// Configuration file path (defaults to ./contato.toml when present)
    #[arg(short, long, env = "CONTATO_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Settings that override the configuration file
    #[command(flatten)]
    pub overrides: Overrides,

    /// Subcommand; `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server
    Serve,
    /// Inspect or create the configuration file
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `contato config ...` actions.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print one value by dotted key (e.g. `store.backend`)
    Get {
        /// Dotted key
        key: String,
    },
    /// Write a default configuration file
    Init {
        /// Target path
        #[arg(long, default_value = "contato.toml")]
        file: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Per-setting overrides from flags or environment variables.
///
/// Anything left unset keeps the value from the file or the default.
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Listen address
    #[arg(long, env = "CONTATO_BIND", global = true)]
    pub bind: Option<String>,

    /// Static asset directory
    #[arg(long, env = "CONTATO_STATIC_DIR", global = true)]
    pub static_dir: Option<PathBuf>,

    /// Disable the permissive CORS layer
    #[arg(long, env = "CONTATO_NO_CORS", global = true)]
    pub no_cors: bool,

    /// Storage backend
    #[arg(long, value_enum, env = "CONTATO_BACKEND", global = true)]
    pub backend: Option<Backend>,

    /// Service-account credential file for the spreadsheet backend
    #[arg(long, env = "CONTATO_CREDENTIALS", global = true)]
    pub credentials: Option<PathBuf>,

    /// Spreadsheet name or URL
    #[arg(long, env = "CONTATO_SHEET", global = true)]
    pub sheet: Option<String>,

    /// SQLite connection string
    #[arg(long, env = "CONTATO_DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    /// Log filter directive (RUST_LOG still wins)
    #[arg(long, env = "CONTATO_LOG", global = true)]
    pub log_filter: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, env = "CONTATO_LOG_JSON", global = true)]
    pub log_json: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_parses() {
        let args = Args::try_parse_from(["contato"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.overrides, Overrides::default());
    }

    #[test]
    fn test_serve_with_overrides() {
        let args = Args::try_parse_from([
            "contato",
            "serve",
            "--backend",
            "sheets",
            "--sheet",
            "https://docs.google.com/spreadsheets/d/abc123/edit",
            "--bind",
            "127.0.0.1:9000",
        ])
        .unwrap();
        assert_eq!(args.command, Some(Command::Serve));
        assert_eq!(args.overrides.backend, Some(Backend::Sheets));
        assert_eq!(args.overrides.bind.as_deref(), Some("127.0.0.1:9000"));
    }

    #[test]
    fn test_config_get_and_init() {
        let args = Args::try_parse_from(["contato", "config", "get", "store.backend"]).unwrap();
        assert_eq!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Get {
                    key: "store.backend".into()
                }
            })
        );

        let args =
            Args::try_parse_from(["contato", "config", "init", "--file", "x.toml", "--force"])
                .unwrap();
        assert_eq!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Init {
                    file: PathBuf::from("x.toml"),
                    force: true
                }
            })
        );
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(Args::try_parse_from(["contato", "--backend", "postgres"]).is_err());
    }
}
