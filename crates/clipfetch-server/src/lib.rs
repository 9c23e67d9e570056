//! HTTP server for clipfetch.
//!
//! Exposes the validate/download API over Axum, with Swagger UI at
//! `/api-docs` and a health probe at `/health`.

pub mod context;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;

pub use context::AppContext;
pub use error::AppError;
pub use router::build_router;

use clipfetch_core::Config;

/// Start the HTTP server and block until shutdown.
pub async fn start(config: Config) -> clipfetch_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("{warning}");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let ctx = AppContext::from_config(config)?;

    for tool in ctx.tools.check_all() {
        if tool.available {
            tracing::info!(tool = %tool.name, path = ?tool.path, "Tool available");
        } else {
            tracing::warn!(tool = %tool.name, "Tool not found; falling back where possible");
        }
    }

    let app = build_router(ctx);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{addr}");
    tracing::info!("API docs at http://{addr}/api-docs");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
