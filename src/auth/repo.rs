use anyhow::Context;
use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::auth::repo_types::{NewUser, User};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique field already holds this value.
    #[error("{message}")]
    Duplicate { field: String, message: String },
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    pub fn duplicate(field: &str) -> Self {
        StoreError::Duplicate {
            field: field.to_string(),
            message: format!("User validation failed: {} is already taken", field),
        }
    }

    /// Per-field details for the response body, keyed by the offending field.
    pub fn field_errors(&self) -> Option<Value> {
        match self {
            StoreError::Duplicate { field, message } => Some(json!({
                field.as_str(): {
                    "kind": "unique",
                    "path": field,
                    "message": message,
                }
            })),
            StoreError::Backend(_) => None,
        }
    }
}

/// The single-collection user store the handlers talk to.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Case-insensitive lookup by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_access_token(&self, token: &str) -> Result<Option<User>, StoreError>;
    /// Inserts a user; fails with `StoreError::Duplicate` instead of overwriting.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;
    /// Releases any held connections. Called once at shutdown.
    async fn close(&self);
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .context("run migrations")?;
        Ok(())
    }
}

const USER_COLUMNS: &str = "id, name, email, password_hash, access_token, created_at";

fn map_insert_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some(c) if c.contains("email") => "email",
                Some(c) if c.contains("access_token") => "accessToken",
                _ => "name",
            };
            return StoreError::duplicate(field);
        }
    }
    StoreError::Backend(anyhow::Error::new(e).context("insert user"))
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE lower(email) = lower($1)"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    async fn find_by_access_token(&self, token: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE access_token = $1"
        ))
        .bind(token)
        .fetch_optional(&self.db)
        .await
        .context("find user by access token")?;
        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, email, password_hash, access_token)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.access_token)
        .fetch_one(&self.db)
        .await
        .map_err(map_insert_error)
    }

    async fn close(&self) {
        self.db.close().await;
    }
}
