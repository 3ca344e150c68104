use crate::config;
use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use std::time::Duration;

/// Pool settings read from `DATABASE_URL`, `DB_MAX_CONNECTIONS` and
/// `DB_ACQUIRE_TIMEOUT_SECONDS`.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DbConfig {
    pub fn from_env(default_max_connections: u32) -> Result<Self> {
        Ok(Self {
            database_url: config::required_env("DATABASE_URL")?,
            max_connections: config::parse_env_or("DB_MAX_CONNECTIONS", default_max_connections)?,
            acquire_timeout: Duration::from_secs(config::parse_env_or(
                "DB_ACQUIRE_TIMEOUT_SECONDS",
                10u64,
            )?),
        })
    }
}

pub async fn connect(config: &DbConfig) -> Result<Pool<Postgres>> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

pub async fn check_ready(pool: &Pool<Postgres>) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn from_env_reads_pool_settings() {
        env::set_var("DATABASE_URL", "postgres://cs@localhost/cs");
        env::set_var("DB_ACQUIRE_TIMEOUT_SECONDS", "3");
        env::remove_var("DB_MAX_CONNECTIONS");

        let config = DbConfig::from_env(4).expect("db config");
        assert_eq!(config.database_url, "postgres://cs@localhost/cs");
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.acquire_timeout, Duration::from_secs(3));

        env::set_var("DB_ACQUIRE_TIMEOUT_SECONDS", "soon");
        assert!(DbConfig::from_env(4).is_err());

        env::remove_var("DATABASE_URL");
        env::remove_var("DB_ACQUIRE_TIMEOUT_SECONDS");
    }
}
