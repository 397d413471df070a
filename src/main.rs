//! Bookshelf Server - book catalog REST API
//!
//! Loads configuration, opens the shared database pool and summary client,
//! and serves the API until interrupted.

use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use bookshelf_server::{
    api,
    config::{AppConfig, LoggingConfig},
    repository::Repository,
    services::{summary::OpenAiSummaryGenerator, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_tracing(&config.logging);

    tracing::info!("Starting Bookshelf Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Database migrations completed");

    if !config.summary.has_api_key() {
        tracing::warn!("No summary API key configured; book creation will fail until OPENAI_API_KEY is set");
    }
    let summaries = OpenAiSummaryGenerator::new(config.summary.clone())?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    // Create repository and services
    let repository = Repository::new(pool.clone());
    let services = Services::new(repository, Arc::new(summaries));

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Database pool closed, bye");

    Ok(())
}

/// Install the global subscriber. Returns the file writer guard when file
/// logging is enabled.
fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bookshelf_server={},tower_http=debug", logging.level).into());

    let stdout = if logging.format == "json" {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    let (file, guard) = match &logging.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "bookshelf.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout)
        .with(file)
        .init();

    guard
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
