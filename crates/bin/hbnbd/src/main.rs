//! # hbnbd: hbnb API daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load settings (`hbnb.toml`, `HBNB_*` env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the storage engine and the record service
//! - Build the axum router, injecting the service
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use axum::ServiceExt;
use axum::extract::Request;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use hbnb_adapter_http_axum::router;
use hbnb_adapter_http_axum::state::AppState;
use hbnb_adapter_storage_sqlite_sqlx::Database;
use hbnb_app::services::record_service::RecordService;

use crate::config::Settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log.filter))
        .init();

    // Database
    let db = Database::open(&settings.storage.url).await?;

    // HTTP
    let state = AppState::new(RecordService::new(db.storage()));
    let app = router::build(state);

    let bind_addr = settings.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "hbnbd listening");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("hbnbd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections");
}
