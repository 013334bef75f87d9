//! SQLite pool setup and schema migration.

use anyhow::{Context, Result};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

const SCHEMA: &str = include_str!("../../migrations/001_init.sql");

/// Shared handle to the weather store.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Open (creating if needed) the database at `db_path` and apply the schema.
///
/// The schema only uses `IF NOT EXISTS`, so reopening an existing file is safe.
pub async fn init_database(db_path: &str, max_connections: u32) -> Result<Database> {
    if let Some(parent) = Path::new(db_path).parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory for {}", db_path))?;
    }

    info!("Opening weather store at {}", db_path);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await
        .with_context(|| format!("connecting to {}", db_path))?;

    sqlx::raw_sql(SCHEMA)
        .execute(&pool)
        .await
        .context("applying weather store schema")?;
    info!("Weather store schema ready");

    Ok(Database { pool })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn table_count(db: &Database) -> i64 {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='current_weather'",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();
        count
    }

    #[tokio::test]
    async fn in_memory_store_gets_schema() {
        let db = init_database(":memory:", 1).await.unwrap();
        assert_eq!(table_count(&db).await, 1);
    }

    #[tokio::test]
    async fn reopening_file_store_keeps_schema_and_rows() {
        let path = std::env::temp_dir()
            .join(format!("flightwx-db-{}", uuid::Uuid::new_v4()))
            .join("weather.db");
        let path = path.to_string_lossy().to_string();

        let first = init_database(&path, 1).await.unwrap();
        sqlx::query(
            "INSERT INTO current_weather (time, latitude, longitude) VALUES ('2026-10-19T12:00:00+00:00', 1.0, 2.0)",
        )
        .execute(first.pool())
        .await
        .unwrap();
        first.pool().close().await;

        let second = init_database(&path, 1).await.unwrap();
        assert_eq!(table_count(&second).await, 1);
        let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM current_weather")
            .fetch_one(second.pool())
            .await
            .unwrap();
        assert_eq!(rows, 1);

        second.pool().close().await;
        if let Some(dir) = Path::new(&path).parent() {
            std::fs::remove_dir_all(dir).ok();
        }
    }
}
