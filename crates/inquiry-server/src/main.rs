//! Inquiry relay server entry point.
//!
//! Loads configuration, builds the SMTP mailer, and serves the relay
//! endpoint until SIGINT or SIGTERM.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use inquiry_core::mailer::SmtpMailer;
use inquiry_server::config::ServerConfig;
use inquiry_server::routes::build_router;
use inquiry_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(
        smtp_host = %config.smtp.host,
        smtp_port = config.smtp.port,
        tls = ?config.smtp.tls,
        "inquiry relay starting"
    );

    let state = build_app_state(&config)?;
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "inquiry relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("inquiry relay stopped");
    Ok(())
}

/// Build the shared application state.
fn build_app_state(config: &ServerConfig) -> anyhow::Result<Arc<AppState>> {
    if !config.mail.is_configured() {
        warn!("SMTP_USER/SMTP_PASS not set, every inquiry will be answered with a configuration error");
    }

    let mailer = SmtpMailer::new(&config.smtp, config.mail.sender.as_ref())
        .context("failed to build SMTP transport")?;

    Ok(Arc::new(AppState {
        settings: config.mail.clone(),
        mailer: Arc::new(mailer),
    }))
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
