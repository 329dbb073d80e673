//! SQLite 案件存储

use async_trait::async_trait;
use casedb_common::row::{case_action_from_row, case_record_from_row};
use casedb_common::{
    CaseAction, CaseActionSpec, CaseRecord, CaseRecordSpec, CaseStatements, Identifier, Placeholder,
};
use casedb_errors::{AppError, AppResult, WriteErrorKind};
use casedb_ports::CaseStorageService;
use casedb_telemetry::{Outcome, record_storage_operation};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::config::SqliteConfig;
use crate::connection::create_pool;
use crate::migration::MigrationManager;
use crate::schema;

const BACKEND: &str = "sqlite";
const STATEMENTS: CaseStatements = CaseStatements::new(Placeholder::Question);

pub struct SqliteCaseStorage {
    pool: SqlitePool,
}

impl SqliteCaseStorage {
    /// 包装一个已完成迁移的连接池
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 建立连接池并执行表结构迁移
    pub async fn connect(config: &SqliteConfig) -> AppResult<Self> {
        let pool = create_pool(config).await?;

        let result = MigrationManager::new(pool.clone())
            .migrate(&schema::migrations())
            .await?;
        if !result.is_success() {
            return Err(AppError::configuration(format!(
                "Schema migration failed: {}",
                result.error_summary()
            )));
        }

        info!(
            applied = result.applied_count(),
            skipped = result.skipped.len(),
            "SQLite case storage ready"
        );
        Ok(Self::new(pool))
    }

    /// 内存数据库，生命周期与连接池相同
    pub async fn in_memory() -> AppResult<Self> {
        Self::connect(&SqliteConfig::in_memory()).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn finish<T>(operation: &'static str, result: AppResult<T>) -> AppResult<T> {
    record_storage_operation(BACKEND, operation, Outcome::of(&result));
    result
}

#[async_trait]
impl CaseStorageService for SqliteCaseStorage {
    async fn save_new_case(&self, id: &Identifier) -> AppResult<()> {
        debug!(case_id = %id, "DB: Saving new case");
        let record = CaseRecord::new(id.clone());
        let sql = STATEMENTS.insert_case();

        let result = sqlx::query(&sql)
            .bind(record.id.as_str())
            .bind(record.status.as_str())
            .bind(&record.description)
            .bind(record.created_at)
            .bind(record.updated_at)
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::from_write(e, &format!("save case {}", id)));

        match &result {
            Ok(()) => debug!(case_id = %id, "DB: Saved new case"),
            Err(e) => warn!(case_id = %id, error = %e, "DB: Failed to save case"),
        }
        finish("save_new_case", result)
    }

    async fn find_case(&self, id: &Identifier, spec: &CaseRecordSpec) -> AppResult<CaseRecord> {
        let sql = STATEMENTS.select_case(spec);

        let result = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_read(e, &format!("find case {}", id)))
            .and_then(|row| row.ok_or_else(|| AppError::not_found(format!("case {}", id))))
            .and_then(|row| {
                case_record_from_row(&row, spec)
                    .map_err(|e| AppError::from_read(e, &format!("decode case {}", id)))
            });

        match &result {
            Ok(record) => debug!(case_id = %record.id, status = %record.status, "DB: Found case"),
            Err(e) => warn!(case_id = %id, error = %e, "DB: Failed to find case"),
        }
        finish("find_case", result)
    }

    async fn find_all_cases(&self, spec: &CaseRecordSpec) -> AppResult<Vec<CaseRecord>> {
        let sql = STATEMENTS.select_all_cases(spec);

        let result = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .and_then(|rows| {
                rows.iter()
                    .map(|row| case_record_from_row(row, spec))
                    .collect::<Result<Vec<_>, _>>()
            })
            .map_err(|e| AppError::from_read(e, "find all cases"));

        match &result {
            Ok(records) => debug!(count = records.len(), "DB: Found all cases"),
            Err(e) => warn!(error = %e, "DB: Failed to find all cases"),
        }
        finish("find_all_cases", result)
    }

    async fn update_case(&self, record: &mut CaseRecord) -> AppResult<()> {
        let updated_at = Utc::now();
        let sql = STATEMENTS.update_case();

        let result = sqlx::query(&sql)
            .bind(record.id.as_str())
            .bind(record.status.as_str())
            .bind(&record.description)
            .bind(updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, &format!("update case {}", record.id)))
            .and_then(|done| {
                if done.rows_affected() == 0 {
                    Err(AppError::storage_write(
                        WriteErrorKind::MissingRecord,
                        format!("case {} does not exist", record.id),
                    ))
                } else {
                    Ok(())
                }
            });

        match &result {
            Ok(()) => {
                record.updated_at = updated_at;
                debug!(case_id = %record.id, status = %record.status, "DB: Updated case");
            }
            Err(e) => warn!(case_id = %record.id, error = %e, "DB: Failed to update case"),
        }
        finish("update_case", result)
    }

    async fn save_case_context(&self, action: &CaseAction) -> AppResult<()> {
        let sql = STATEMENTS.insert_action();

        let result = sqlx::query(&sql)
            .bind(action.id.as_str())
            .bind(action.case_record_id.as_str())
            .bind(&action.action)
            .bind(action.status.as_str())
            .bind(&action.error)
            .bind(action.created_at)
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::from_write(e, &format!("save case context {}", action.id)));

        match &result {
            Ok(()) => debug!(
                action_id = %action.id,
                case_id = %action.case_record_id,
                "DB: Saved case context"
            ),
            Err(e) => warn!(
                action_id = %action.id,
                case_id = %action.case_record_id,
                error = %e,
                "DB: Failed to save case context"
            ),
        }
        finish("save_case_context", result)
    }

    async fn get_case_context(
        &self,
        id: &Identifier,
        spec: &CaseActionSpec,
    ) -> AppResult<CaseAction> {
        let sql = STATEMENTS.select_action(spec);

        let result = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_read(e, &format!("get case context {}", id)))
            .and_then(|row| row.ok_or_else(|| AppError::not_found(format!("case action {}", id))))
            .and_then(|row| {
                case_action_from_row(&row, spec)
                    .map_err(|e| AppError::from_read(e, &format!("decode case action {}", id)))
            });

        match &result {
            Ok(_) => debug!(action_id = %id, "DB: Found case context"),
            Err(e) => warn!(action_id = %id, error = %e, "DB: Failed to find case context"),
        }
        finish("get_case_context", result)
    }

    async fn get_context_for_case(&self, case_id: &Identifier) -> AppResult<Vec<CaseAction>> {
        let spec = CaseActionSpec::all();
        let sql = STATEMENTS.select_actions_for_case(&spec);

        let result = sqlx::query(&sql)
            .bind(case_id.as_str())
            .fetch_all(&self.pool)
            .await
            .and_then(|rows| {
                rows.iter()
                    .map(|row| case_action_from_row(row, &spec))
                    .collect::<Result<Vec<_>, _>>()
            })
            .map_err(|e| AppError::from_read(e, &format!("get context for case {}", case_id)));

        match &result {
            Ok(actions) => debug!(case_id = %case_id, count = actions.len(), "DB: Found context for case"),
            Err(e) => warn!(case_id = %case_id, error = %e, "DB: Failed to find context for case"),
        }
        finish("get_context_for_case", result)
    }
}
