//! Database connection management

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tokio::fs;
use tracing::info;
use relay_config::DatabaseConfig;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Prepare and establish a database connection
pub async fn prepare_database(config: &DatabaseConfig) -> Result<SqlitePool> {
    anyhow::ensure!(
        config.url.starts_with("sqlite:"),
        "unsupported database url {}, only sqlite is supported",
        config.url
    );

    let in_memory = is_in_memory(&config.url);
    if !in_memory {
        ensure_sqlite_directory(&config.url).await?;
    }

    let options = SqliteConnectOptions::from_str(&config.url)
        .with_context(|| format!("invalid database url {}", config.url))?
        .create_if_missing(true)
        .busy_timeout(BUSY_TIMEOUT);

    // An in-memory database lives only as long as its connection, so pin a single one.
    let (options, pool_options) = if in_memory {
        let pool_options = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
        (options, pool_options)
    } else {
        let pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
        (options.journal_mode(SqliteJournalMode::Wal), pool_options)
    };
    let max_connections = pool_options.get_max_connections();

    let pool = pool_options
        .connect_with(options)
        .await
        .with_context(|| format!("failed to connect to database {}", config.url))?;

    info!(url = %config.url, max_connections, "database connection established");
    Ok(pool)
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Ensure the directory holding the SQLite database file exists
async fn ensure_sqlite_directory(url: &str) -> Result<()> {
    let Some(sqlite_path) = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };

    let sqlite_path = sqlite_path.split('?').next().unwrap_or(sqlite_path);
    let path = Path::new(sqlite_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create sqlite directory {}", parent.display())
            })?;
        }
    }

    Ok(())
}
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn ping(pool: &SqlitePool) {
        sqlx::query("SELECT 1").fetch_one(pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_prepare_database_creates_nested_file() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("test.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 1,
        };

        let pool = prepare_database(&config).await.unwrap();
        ping(&pool).await;
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_in_memory_database_uses_single_connection() {
        let config = DatabaseConfig {
            url: "sqlite://:memory:".to_string(),
            max_connections: 8,
        };

        let pool = prepare_database(&config).await.unwrap();
        ping(&pool).await;
        assert_eq!(pool.options().get_max_connections(), 1);
    }
}
