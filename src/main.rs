use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use catalog_admin_api::config::AppConfig;
use catalog_admin_api::database::{self, Repositories};
use catalog_admin_api::routes;
use catalog_admin_api::state::AppState;

const DEFAULT_LOG_FILTER: &str = "info,tower_http=info,sqlx=warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    info!("Starting catalog admin API in {:?} mode", config.environment);

    if !config.security.has_jwt_secret() {
        warn!("JWT_SECRET is not set; logins will fail and every bearer token will be rejected");
    }

    let pool = database::connect(&config.database).context("failed to create database pool")?;

    if let Err(e) = database::schema::ensure_schema(&pool).await {
        error!("Schema bootstrap failed, continuing with existing tables: {}", e);
    }

    let port = config.api.port;
    let state = AppState::new(config, Repositories::postgres(pool.clone()));
    let app = routes::app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Server is running on port {}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}
