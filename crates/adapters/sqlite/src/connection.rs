//! SQLite 连接管理

use std::str::FromStr;

use casedb_errors::{AppError, AppResult};
use sqlx::ConnectOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::config::SqliteConfig;

fn connect_options(config: &SqliteConfig) -> AppResult<SqliteConnectOptions> {
    let parsed = if config.path.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(&config.path)
    } else if config.is_memory() {
        SqliteConnectOptions::from_str("sqlite::memory:")
    } else {
        Ok(SqliteConnectOptions::new().filename(&config.path))
    };
    let options = parsed
        .map_err(|e| AppError::configuration(format!("Invalid SQLite address: {}", e)))?;

    let mut options = options
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(config.busy_timeout);

    if config.enable_wal && !config.is_memory() {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }
    if !config.log_sql {
        options = options.disable_statement_logging();
    }

    Ok(options)
}

/// 创建 SQLite 连接池
///
/// 内存数据库只保留一个永不回收的连接，否则数据库会随连接关闭而消失。
pub async fn create_pool(config: &SqliteConfig) -> AppResult<SqlitePool> {
    let options = connect_options(config)?;

    let pool_options = SqlitePoolOptions::new().acquire_timeout(config.acquire_timeout);
    let pool_options = if config.is_memory() {
        pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
    };

    pool_options
        .connect_with(options)
        .await
        .map_err(|e| AppError::configuration(format!("Failed to open SQLite database: {}", e)))
}

/// 检查数据库连接
pub async fn check_connection(pool: &SqlitePool) -> AppResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| AppError::storage_read(format!("Database health check failed: {}", e)))?;
    Ok(())
}
