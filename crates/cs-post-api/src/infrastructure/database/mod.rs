use crate::application::ports::StorageHealth;
use crate::shared::error::AppError;
use async_trait::async_trait;
use sqlx::{Pool, Postgres};

mod documents;
mod posts;
mod queries;
mod reactions;

/// Postgres-backed implementation of every storage port.
#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}

#[async_trait]
impl StorageHealth for PgStore {
    async fn check_ready(&self) -> Result<(), AppError> {
        cs_core::db::check_ready(&self.pool)
            .await
            .map_err(|err| AppError::Storage(err.to_string()))
    }
}
