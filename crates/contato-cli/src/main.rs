//! Contato
//!
//! Contact-form intake service.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use contato_cli::config_handlers::handle_config_command;
use contato_cli::{Args, Command, ContatoConfig, logging, serve};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = ContatoConfig::resolve(args.config.as_deref(), &args.overrides)?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            logging::init(&config.logging)?;
            tracing::info!(
                version = env!("CARGO_PKG_VERSION"),
                backend = config.store.backend.as_str(),
                bind = %config.server.bind,
                "Starting contato"
            );
            serve::run(&config).await
        }
        Command::Config { action } => {
            handle_config_command(&config, &action)?;
            Ok(())
        }
    }
}
