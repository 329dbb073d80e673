//! PostgreSQL 连接管理

use std::str::FromStr;

use casedb_errors::{AppError, AppResult};
use sqlx::ConnectOptions;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::config::PostgresConfig;

/// 创建 PostgreSQL 连接池
///
/// 地址无法解析或数据库不可达时立即失败。
pub async fn create_pool(config: &PostgresConfig) -> AppResult<PgPool> {
    let mut options = PgConnectOptions::from_str(&config.url)
        .map_err(|e| AppError::configuration(format!("Invalid PostgreSQL address: {}", e)))?;

    if let Some(ref app_name) = config.application_name {
        options = options.application_name(app_name);
    }
    if !config.log_sql {
        options = options.disable_statement_logging();
    }

    PgPoolOptions::new()
        .max_connections(config.pool_max)
        .min_connections(config.pool_min)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
        .connect_with(options)
        .await
        .map_err(|e| AppError::configuration(format!("Failed to create pool: {}", e)))
}

/// 检查数据库连接
pub async fn check_connection(pool: &PgPool) -> AppResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| AppError::storage_read(format!("Database health check failed: {}", e)))?;
    Ok(())
}
