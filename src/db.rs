use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::{auth::repo::PgUserStore, config::AppConfig};

pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let db = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")?;
    info!(max_connections = config.db_max_connections, "database pool ready");
    Ok(db)
}

/// Connects, applies migrations and returns the Postgres-backed user store.
pub async fn init_user_store(config: &AppConfig) -> anyhow::Result<PgUserStore> {
    let store = PgUserStore::new(connect(config).await?);
    store.migrate().await?;
    Ok(store)
}
