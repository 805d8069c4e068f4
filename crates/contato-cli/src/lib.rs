//! # contato-cli
//!
//! Process wiring for the `contato` binary:
//! - command-line arguments and environment overrides
//! - TOML configuration with `config show|get|init` subcommands
//! - logging setup
//! - backend selection and the serve loop

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod backend;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod logging;
pub mod serve;

pub use cli::{Args, Command, ConfigAction, Overrides};
pub use config::{Backend, ContatoConfig};
pub use error::{Error, Result};
