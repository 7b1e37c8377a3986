use crate::auth::{memory::InMemoryUserStore, repo::UserStore};
use crate::config::{AppConfig, StoreKind};
use crate::db;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        let store: Arc<dyn UserStore> = match config.store {
            StoreKind::Postgres => Arc::new(db::init_user_store(&config).await?),
            StoreKind::Memory => Arc::new(InMemoryUserStore::new()),
        };
        info!(store = ?config.store, "user store initialised");

        Ok(Self::from_parts(store, Arc::new(config)))
    }

    pub fn from_parts(store: Arc<dyn UserStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    /// State backed by a fresh in-memory store.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(InMemoryUserStore::new()))
    }

    #[cfg(test)]
    pub fn with_store(store: Arc<dyn UserStore>) -> Self {
        let config = Arc::new(AppConfig {
            database_url: String::new(),
            db_max_connections: 1,
            host: "127.0.0.1".into(),
            port: 0,
            store: StoreKind::Memory,
        });
        Self::from_parts(store, config)
    }

    /// Releases the store's connections.
    pub async fn shutdown(&self) {
        self.store.close().await;
        info!("user store closed");
    }
}
