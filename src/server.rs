//! Process wiring shared by the three services: bind, serve, shut down.

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

/// Bind `host:port` and serve `app` until Ctrl-C.
pub async fn serve(app: Router, service: &str, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await.with_context(|| {
        format!(
            "Failed to bind {} service to {} (port may already be in use, check with: lsof -i :{})",
            service, addr, port
        )
    })?;

    tracing::info!("🚀 {} service listening on http://{}", service, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .with_context(|| format!("{} service stopped with an error", service))?;

    tracing::info!("{} service stopped", service);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
