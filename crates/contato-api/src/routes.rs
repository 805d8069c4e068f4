//! Router assembly.

use std::path::PathBuf;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Options for [`build_router`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Directory served for every path no API route matches.
    pub static_dir: PathBuf,
    /// Allow cross-origin requests from any origin, with credentials.
    pub cors: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("static"),
            cors: true,
        }
    }
}

/// Builds the application router.
///
/// Static assets are the router fallback, so they are consulted only after
/// every API route has failed to match. The listing routes exist only when
/// the store can list; otherwise those paths fall through to static files.
pub fn build_router(state: AppState, config: &ApiConfig) -> Router {
    let mut api = Router::new()
        .route("/api/contact", post(handlers::create_contact))
        .route("/api/health", get(handlers::health));

    if state.store.supports_listing() {
        api = api
            .route("/api/contacts", get(handlers::list_contacts))
            .route("/contatos", get(handlers::contacts_page));
    } else {
        tracing::info!(
            backend = state.store.backend(),
            "Store cannot list; /api/contacts and /contatos are not mounted"
        );
    }

    let router = api
        .fallback_service(ServeDir::new(&config.static_dir))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.cors {
        router.layer(CorsLayer::very_permissive())
    } else {
        router
    }
}
