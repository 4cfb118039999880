//! docsite - documentation and marketing site for the CLI
//!
//! With the `server` feature this binary serves the server-rendered pages;
//! with `web` it is the browser client that takes over the page.

#[cfg(feature = "server")]
use docsite::{api, config, ui};

#[cfg(feature = "server")]
use anyhow::Result;
#[cfg(feature = "server")]
use axum::{routing::get, Router};
#[cfg(feature = "server")]
use tokio::signal;
#[cfg(feature = "server")]
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};
#[cfg(feature = "server")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "server")]
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docsite=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting docsite v{} ({})",
        env!("DOCSITE_VERSION"),
        env!("DOCSITE_GIT_SHA")
    );

    // Load configuration
    let config = config::load_config()?;
    tracing::info!("Configuration loaded, port: {}", config.port);

    let client_dir = config.site.client_dir.clone();
    let state = api::AppState::new(config.site);

    let mut app = Router::new()
        // Health check
        .route("/status", get(api::status_handler))
        // Pages
        .merge(ui::page_routes());

    // Built web client (wasm + JS glue)
    if let Some(dir) = client_dir {
        tracing::info!("Serving web client from {}", dir.display());
        app = app.nest_service("/assets", ServeDir::new(dir));
    }

    let app = app
        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(not(feature = "server"))]
fn main() {
    dioxus::launch(docsite::app::App);
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
#[cfg(feature = "server")]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
