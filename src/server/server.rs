use anyhow::{Context, Result};
use std::future::IntoFuture;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::timeout::TimeoutLayer;
use tracing::{error, info, warn};

use super::{
    album_routes::make_album_routes, log_requests, metrics::metrics_handler, state::*,
    ServerConfig,
};

pub fn make_app(config: ServerConfig, album_service: GuardedAlbumService) -> Router {
    let request_timeout = config.request_timeout;
    let state = ServerState::new(config, album_service);

    make_album_routes(state.clone())
        .layer(middleware::from_fn_with_state(state, log_requests))
        .layer(TimeoutLayer::new(request_timeout))
}

fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

/// Serves `app` until `shutdown` is cancelled, then gives in-flight requests
/// up to `grace` to complete before returning.
pub async fn serve_until_shutdown(
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
    grace: Duration,
) -> Result<()> {
    let serve = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.clone().cancelled_owned())
        .into_future();
    let mut serve = std::pin::pin!(serve);

    tokio::select! {
        result = &mut serve => return Ok(result?),
        _ = shutdown.cancelled() => {}
    }

    info!(
        "Shutting down, waiting up to {:?} for in-flight requests",
        grace
    );
    match tokio::time::timeout(grace, serve).await {
        Ok(result) => result?,
        Err(_) => warn!("Grace period elapsed, dropping remaining connections"),
    }
    Ok(())
}

async fn run_metrics_server(port: u16, shutdown: CancellationToken) -> Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", port))?;
    info!("Metrics available at port {}!", port);

    axum::serve(listener, make_metrics_app())
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    Ok(())
}

pub async fn run_server(
    config: ServerConfig,
    album_service: GuardedAlbumService,
    shutdown: CancellationToken,
) -> Result<()> {
    let port = config.port;
    let metrics_port = config.metrics_port;
    let grace = config.shutdown_grace;
    let app = make_app(config, album_service);

    if metrics_port != 0 {
        let metrics_shutdown = shutdown.clone();
        tokio::spawn(async move {
            if let Err(err) = run_metrics_server(metrics_port, metrics_shutdown).await {
                error!("Metrics server stopped: {:#}", err);
            }
        });
    }

    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Ready to serve at port {}!", port);

    serve_until_shutdown(listener, app, shutdown, grace).await
}
