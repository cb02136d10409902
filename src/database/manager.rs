use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DatabaseConfig;

/// Errors from the record store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Stored recipe is not valid JSON: {0}")]
    Recipe(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const CREATE_DRINKS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS drinks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL UNIQUE,
        recipe TEXT NOT NULL
    )
"#;

/// Pool construction and schema management for the drinks table
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| DatabaseError::InvalidDatabaseUrl(format!("{}: {}", config.url, e)))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_with(options)
            .await?;

        info!("Created database pool for: {}", config.url);
        Ok(pool)
    }

    /// Private in-memory database. A single never-recycled connection keeps
    /// the data alive for the lifetime of the pool.
    pub async fn connect_in_memory() -> Result<SqlitePool, DatabaseError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(pool)
    }

    /// Create the drinks table when it does not exist yet
    pub async fn create_all(pool: &SqlitePool) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_DRINKS_TABLE).execute(pool).await?;
        Ok(())
    }

    /// Drop every drink and start from an empty table. Destructive.
    pub async fn drop_and_create_all(pool: &SqlitePool) -> Result<(), DatabaseError> {
        warn!("Dropping and recreating the drinks table; all records are lost");
        let mut tx = pool.begin().await?;
        sqlx::query("DROP TABLE IF EXISTS drinks").execute(&mut *tx).await?;
        sqlx::query(CREATE_DRINKS_TABLE).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &SqlitePool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reset_empties_the_table() {
        let pool = DatabaseManager::connect_in_memory().await.unwrap();
        DatabaseManager::create_all(&pool).await.unwrap();
        sqlx::query("INSERT INTO drinks (title, recipe) VALUES ('Water', '[]')")
            .execute(&pool)
            .await
            .unwrap();

        DatabaseManager::drop_and_create_all(&pool).await.unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM drinks")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
        DatabaseManager::health_check(&pool).await.unwrap();
    }
}
