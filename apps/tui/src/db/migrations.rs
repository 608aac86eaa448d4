use crate::config::AppConfig;
use crate::db::DataError;
use sqlx::{
    migrate::MigrateDatabase, query, sqlite::SqlitePoolOptions, Sqlite, SqlitePool,
};
use tracing::{debug, info};

/// Sets up the database by creating the necessary tables if they don't exist
pub async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(
        "CREATE TABLE IF NOT EXISTS roaster (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            website TEXT,
            location TEXT
        )",
    )
    .execute(pool)
    .await?;

    query(
        "CREATE TABLE IF NOT EXISTS coffee (
            id TEXT PRIMARY KEY,
            roaster_id TEXT NOT NULL REFERENCES roaster(id),
            name TEXT NOT NULL,
            origin TEXT,
            region TEXT,
            process TEXT,
            roast_level TEXT,
            tasting_notes TEXT,
            altitude TEXT,
            varietal TEXT,
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    query(
        "CREATE TABLE IF NOT EXISTS review (
            id TEXT PRIMARY KEY,
            coffee_id TEXT NOT NULL REFERENCES coffee(id),
            user_name TEXT NOT NULL,
            rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
            review_text TEXT,
            brewing_method TEXT,
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    query(
        "CREATE TABLE IF NOT EXISTS location (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            address TEXT NOT NULL,
            city TEXT NOT NULL,
            country TEXT,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            category TEXT NOT NULL CHECK (category IN ('cafe', 'roastery', 'shop')),
            is_open BOOLEAN NOT NULL DEFAULT TRUE,
            is_primary BOOLEAN NOT NULL DEFAULT FALSE,
            distance TEXT,
            roaster_id TEXT REFERENCES roaster(id),
            phone TEXT,
            website TEXT
        )",
    )
    .execute(pool)
    .await?;

    query(
        "CREATE TABLE IF NOT EXISTS location_coffee (
            location_id TEXT NOT NULL REFERENCES location(id),
            coffee_id TEXT NOT NULL REFERENCES coffee(id),
            PRIMARY KEY (location_id, coffee_id)
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Creates a database connection pool for the configured SQLite file and
/// makes sure the schema exists.
pub async fn create_database_pool(config: &AppConfig) -> Result<SqlitePool, DataError> {
    let database_url = &config.database_url;
    info!(%database_url, "initializing database");

    if let Some(parent) = config.database_path.parent() {
        if !parent.exists() {
            debug!(directory = %parent.display(), "creating database directory");
            std::fs::create_dir_all(parent)?;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = parent.metadata()?.permissions().mode();
            if mode & 0o200 == 0 {
                return Err(DataError::NotWritable(parent.to_path_buf()));
            }
        }
    }

    if !Sqlite::database_exists(database_url).await? {
        info!("database does not exist, creating it");
        Sqlite::create_database(database_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .after_connect(|conn, _| {
            Box::pin(async move {
                use sqlx::Executor as _;
                conn.execute("PRAGMA foreign_keys = ON;").await?;
                conn.execute("PRAGMA journal_mode = WAL;").await?;
                conn.execute("PRAGMA synchronous = NORMAL;").await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await?;

    setup_database(&pool).await?;
    info!("database ready");

    Ok(pool)
}

/// In-memory pool with the schema applied. A single connection keeps every
/// query on the same memory database.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    setup_database(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::query_scalar;

    #[tokio::test]
    async fn test_schema_setup_is_idempotent() -> Result<(), sqlx::Error> {
        let pool = create_memory_pool().await?;
        setup_database(&pool).await?;

        let tables: i64 = query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
             AND name IN ('roaster', 'coffee', 'review', 'location', 'location_coffee')",
        )
        .fetch_one(&pool)
        .await?;
        assert_eq!(tables, 5);

        let varietal: i64 = query_scalar(
            "SELECT COUNT(*) FROM pragma_table_info('coffee') WHERE name = 'varietal'",
        )
        .fetch_one(&pool)
        .await?;
        assert_eq!(varietal, 1);

        Ok(())
    }
}
