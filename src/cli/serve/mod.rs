//! Serve command - runs the HTTP API

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use crate::api::create_router;
use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::observability::init_metrics;

/// Run the API server until Ctrl+C or SIGTERM
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration, using defaults: {}", e);
            AppConfig::default()
        }
    };
    logging::init_logging(&config.logging)?;

    let state = crate::create_app_state_with_config(&config).await?;
    let metrics = init_metrics(&config.metrics);
    let app = create_router(state, metrics);

    let addr = build_socket_addr(&config)?;
    info!(
        address = %addr,
        model = %config.provider.model,
        storage = ?config.storage.backend,
        "Starting API server"
    );

    let listener = TcpListener::bind(addr).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("API server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}
