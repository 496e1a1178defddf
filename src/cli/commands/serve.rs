use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::app::{app, AppState};
use crate::auth::JwtVerifier;
use crate::config::AppConfig;
use crate::database::{ListStore, MemoryListStore, PgListStore};

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    info!("Starting Lists API in {:?} mode", config.environment);
    config.validate().context("invalid configuration")?;

    let verifier = JwtVerifier::new(&config.security.jwt_secret)
        .context("JWT_SECRET must be set to verify bearer tokens")?;

    let pg_store = match config.database.url {
        Some(_) => Some(
            PgListStore::connect(&config.database)
                .await
                .context("failed to connect to the list database")?,
        ),
        None => {
            warn!("DATABASE_URL not set; lists are kept in memory and lost on restart");
            None
        }
    };

    let store: Arc<dyn ListStore> = match &pg_store {
        Some(pg) => Arc::new(pg.clone()),
        None => Arc::new(MemoryListStore::new()),
    };

    let bind_addr = config.bind_addr();
    let state = AppState::new(store, Arc::new(verifier), config);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Lists API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(pg) = pg_store {
        pg.close().await;
    }
    info!("Lists API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
