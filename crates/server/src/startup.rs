use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::ServerState;

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file first (`CONFIG_PATH`, default `config.toml`), environment variables when it is missing.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let path = configs::config_path();
    if !std::path::Path::new(&path).exists() {
        info!(%path, "no config file; reading settings from environment");
    }
    AppConfig::load()
}

/// Where records are kept, picked by the `STORAGE` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Database,
    Memory,
}

impl Storage {
    /// `memory` (any case) selects in-process storage; anything else uses the database.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("memory") => Storage::Memory,
            _ => Storage::Database,
        }
    }

    pub fn from_env() -> Self {
        Self::parse(std::env::var("STORAGE").ok().as_deref())
    }
}

/// Connect the store, apply migrations if configured, and wire the services.
pub async fn build_state(cfg: &AppConfig, storage: Storage) -> anyhow::Result<ServerState> {
    if storage == Storage::Memory {
        warn!("STORAGE=memory: records live in process memory only");
        return Ok(ServerState::in_memory());
    }

    cfg.database.validate()?;
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }
    Ok(ServerState::with_database(db))
}

/// Resolves on Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();

    let cfg = load_config()?;
    let state = build_state(&cfg, Storage::from_env()).await?;
    let app: Router = routes::build_router(state, build_cors());

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, "starting server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
