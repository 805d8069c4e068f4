//! # contato-api
//!
//! HTTP surface of the Contato intake service:
//! - `POST /api/contact`: validate and store one submission
//! - `GET /api/contacts`, `GET /contatos`: JSON and HTML listings, only
//!   mounted when the configured store can list
//! - `GET /api/health`: liveness and backend info
//! - everything else: static front-end assets

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod handlers;
pub mod render;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, Error, Result};
pub use routes::{ApiConfig, build_router};
pub use server::Server;
pub use state::AppState;
