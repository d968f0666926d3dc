//! Research agent HTTP server
//!
//! Loads configuration, assembles the research pipeline and serves the
//! search pages and JSON API until Ctrl+C or SIGTERM.

use std::time::Duration;

use infrastructure::{AppConfig, TemplateEngine, build_research_service, init_telemetry};
use presentation_http::{create_router, state::AppState};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Tracing is configured from the loaded config, so a load failure is
    // reported once the subscriber exists.
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let _telemetry = init_telemetry(&config.telemetry_config())?;

    info!("Research agent v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    config.validate()?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        provider = %config.websearch.provider,
        summarizer = %config.summarizer.mode,
        "Configuration loaded"
    );

    let research = build_research_service(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize research pipeline: {e}"))?;
    let templates = TemplateEngine::new(config.templates.clone())
        .map_err(|e| anyhow::anyhow!("Failed to load templates: {e}"))?;

    let addr = config.server.bind_address();
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    let app = create_router(AppState::new(research, templates, config));
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolve on SIGINT or SIGTERM, then arm a hard deadline for draining
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }

    info!(timeout = ?timeout, "Draining open connections");
    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        warn!("Connections still open after shutdown timeout, exiting");
        std::process::exit(0);
    });
}
