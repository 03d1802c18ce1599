use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sea_orm::sqlx::ConnectOptions as _;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, SqlxSqliteConnector};
use tracing::info;

/// Translate pool settings from configuration into sea-orm connect options.
pub fn connect_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    opts
}

/// Each sqlite in-memory connection is a separate database.
fn is_sqlite_memory(cfg: &DatabaseConfig) -> bool {
    cfg.is_sqlite() && cfg.url.contains(":memory:")
}

/// Single connection that is never recycled; losing it would drop every table.
async fn connect_sqlite_memory(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut conn_opts: SqliteConnectOptions = cfg.url.parse()?;
    if !cfg.sqlx_logging {
        conn_opts = conn_opts.disable_statement_logging();
    }
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(conn_opts)
        .await?;
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = if is_sqlite_memory(cfg) {
        connect_sqlite_memory(cfg).await?
    } else {
        Database::connect(connect_options(cfg)).await?
    };
    info!(max_connections = cfg.max_connections, sqlite = cfg.is_sqlite(), "database connected");
    Ok(db)
}
