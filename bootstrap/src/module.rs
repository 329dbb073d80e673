//! 案件存储模块
//!
//! 启动时构造一次，之后把共享句柄交给调用方

use std::sync::Arc;
use std::time::Duration;

use casedb_adapter_postgres::{PostgresCaseStorage, PostgresConfig};
use casedb_adapter_sqlite::{SqliteCaseStorage, SqliteConfig};
use casedb_config::{AppConfig, DatabaseConfig, DatabaseType};
use casedb_errors::{AppError, AppResult};
use casedb_ports::SharedCaseStorage;
use futures::future::BoxFuture;
use secrecy::ExposeSecret;
use tracing::{info, warn};

/// 存储服务工厂
pub type CaseStorageServiceFactory = fn(&AppConfig) -> BoxFuture<'static, AppResult<SharedCaseStorage>>;

fn sqlite_config(config: &DatabaseConfig) -> SqliteConfig {
    SqliteConfig::new(config.address.expose_secret().as_str())
        .with_max_connections(config.max_connections)
        .with_acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .with_log_sql(config.log_sql)
}

fn postgres_config(app_name: &str, config: &DatabaseConfig) -> PostgresConfig {
    PostgresConfig::new(config.address.expose_secret().as_str())
        .with_max_connections(config.max_connections)
        .with_acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .with_log_sql(config.log_sql)
        .with_application_name(app_name)
}

/// 按 `cases_storage` 配置创建 SQL 存储服务（连接并完成表结构迁移）
///
/// 客户端/服务端引擎的连接以 `app_name` 作为 application_name。
pub async fn new_sql_case_storage_service(config: &AppConfig) -> AppResult<SharedCaseStorage> {
    let storage = &config.cases_storage;

    let result: AppResult<SharedCaseStorage> = match storage.database_type {
        DatabaseType::Embedded => SqliteCaseStorage::connect(&sqlite_config(storage))
            .await
            .map(|storage| Arc::new(storage) as SharedCaseStorage),
        DatabaseType::ClientServer => {
            PostgresCaseStorage::connect(&postgres_config(&config.app_name, storage))
                .await
                .map(|storage| Arc::new(storage) as SharedCaseStorage)
        }
    };

    match &result {
        Ok(_) => info!(
            database_type = storage.database_type.as_str(),
            log_sql = storage.log_sql,
            "Case storage service created"
        ),
        Err(e) => warn!(
            database_type = storage.database_type.as_str(),
            error = %e,
            "Failed to create case storage service"
        ),
    }
    result
}

/// 默认工厂：SQL 存储服务
pub fn sql_case_storage_factory(config: &AppConfig) -> BoxFuture<'static, AppResult<SharedCaseStorage>> {
    let config = config.clone();
    Box::pin(async move { new_sql_case_storage_service(&config).await })
}

/// 案件存储模块
pub struct CaseDbModule {
    config: AppConfig,
    storage: SharedCaseStorage,
}

impl CaseDbModule {
    /// 从配置目录加载配置并构造模块
    pub async fn load(config_dir: &str) -> AppResult<Self> {
        let config = AppConfig::load(config_dir)
            .map_err(|e| AppError::configuration(e.to_string()))?;
        Self::from_config(config).await
    }

    /// 使用默认工厂构造
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        Self::with_factory(config, sql_case_storage_factory).await
    }

    /// 使用自定义工厂构造
    pub async fn with_factory(
        config: AppConfig,
        factory: CaseStorageServiceFactory,
    ) -> AppResult<Self> {
        let storage = factory(&config).await?;

        info!(
            app_name = %config.app_name,
            database_type = config.cases_storage.database_type.as_str(),
            "Case storage module initialized"
        );
        Ok(Self { config, storage })
    }

    /// 共享的存储句柄
    pub fn storage(&self) -> SharedCaseStorage {
        Arc::clone(&self.storage)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
