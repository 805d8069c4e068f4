//! Request handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::Html;
use contato_core::{ContactRequest, ListOrder, parse_submission};
use serde::Serialize;

use crate::error::ApiError;
use crate::render::render_contacts_page;
use crate::state::AppState;

/// Health check response.
#[derive(Clone, Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves requests.
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Configured store backend.
    pub backend: &'static str,
    /// Whether the listing routes are mounted.
    pub listing: bool,
}

/// `POST /api/contact`
///
/// The body is validated before the store is touched; a rejected body never
/// reaches it.
pub async fn create_contact(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ContactRequest>, ApiError> {
    let contact = parse_submission(&body)?;
    let stored = state.store.append(contact).await?;
    tracing::info!(
        backend = state.store.backend(),
        id = ?stored.id,
        "Contact request stored"
    );
    Ok(Json(stored))
}

/// `GET /api/contacts`: every record, oldest first.
pub async fn list_contacts(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactRequest>>, ApiError> {
    let contacts = state.store.list_all(ListOrder::Ascending).await?;
    Ok(Json(contacts))
}

/// `GET /contatos`: HTML table, newest first.
pub async fn contacts_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let contacts = state.store.list_all(ListOrder::Descending).await?;
    Ok(Html(render_contacts_page(&contacts)))
}

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "contato",
        version: env!("CARGO_PKG_VERSION"),
        backend: state.store.backend(),
        listing: state.store.supports_listing(),
    })
}
