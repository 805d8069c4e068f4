//! API server implementation

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::Result;

/// Contato API server
pub struct Server {
    router: Router,
}

impl Server {
    /// Create a server for an already-built router
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Bind a listener on `addr` (e.g. `0.0.0.0:8000`)
    pub async fn bind(addr: &str) -> Result<TcpListener> {
        Ok(TcpListener::bind(addr).await?)
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local: Option<SocketAddr> = listener.local_addr().ok();
        tracing::info!(addr = ?local, "Contato API listening");
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("Contato API stopped");
        Ok(())
    }
}
