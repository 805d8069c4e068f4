//! `contato serve`

use std::future::Future;

use contato_api::{ApiConfig, AppState, Server, build_router};

use crate::backend::{OpenedStore, open_store};
use crate::config::{ContatoConfig, ServerConfig};

/// Opens the store, serves until a shutdown signal, then closes the store.
pub async fn run(config: &ContatoConfig) -> anyhow::Result<()> {
    let opened = open_store(&config.store).await?;
    serve_store(&config.server, opened, wait_for_shutdown_signal()).await
}

/// Serves `opened` until `shutdown` resolves.
///
/// The store is closed whether serving ends normally or binding fails.
pub async fn serve_store<F>(
    config: &ServerConfig,
    opened: OpenedStore,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let api = ApiConfig {
        static_dir: config.static_dir.clone(),
        cors: config.cors,
    };
    if !api.static_dir.is_dir() {
        tracing::warn!(
            static_dir = %api.static_dir.display(),
            "Static directory not found; only API routes will answer"
        );
    }
    let router = build_router(AppState::new(opened.shared()), &api);

    let served = match Server::bind(&config.bind).await {
        Ok(listener) => Server::new(router).run(listener, shutdown).await,
        Err(e) => Err(e),
    };

    opened.close().await;
    served?;
    Ok(())
}

/// Resolves on SIGTERM or SIGINT (Ctrl-C elsewhere).
pub async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                tracing::warn!("Could not register signal handlers; falling back to Ctrl-C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{Backend, StoreConfig};
    use contato_core::ContactRequest;

    async fn open_sqlite(dir: &tempfile::TempDir) -> OpenedStore {
        let config = StoreConfig {
            backend: Backend::Sqlite,
            database_url: format!("sqlite://{}", dir.path().join("contatos.db").display()),
            ..StoreConfig::default()
        };
        open_store(&config).await.unwrap()
    }

    fn server_config(bind: &str) -> ServerConfig {
        ServerConfig {
            bind: bind.to_string(),
            ..ServerConfig::default()
        }
    }

    #[tokio::test]
    async fn test_bind_failure_still_closes_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let opened = open_sqlite(&dir).await;
        let store = opened.shared();

        let result = serve_store(&server_config("not-an-address"), opened, async {}).await;
        assert!(result.is_err());

        let err = store
            .append(ContactRequest::new("Ana", "ana@x.com", "1"))
            .await
            .unwrap_err();
        assert!(matches!(err, contato_core::StoreError::Backend { .. }));
    }

    #[tokio::test]
    async fn test_clean_shutdown_closes_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let opened = open_sqlite(&dir).await;
        let store = opened.shared();

        serve_store(&server_config("127.0.0.1:0"), opened, async {})
            .await
            .unwrap();

        assert!(
            store
                .append(ContactRequest::new("Ana", "ana@x.com", "1"))
                .await
                .is_err()
        );
    }
}
