//! 案件存储契约

use std::sync::Arc;

use async_trait::async_trait;
use casedb_common::{CaseAction, CaseActionSpec, CaseRecord, CaseRecordSpec, Identifier};
use casedb_errors::AppResult;

/// 案件存储服务
///
/// 每个操作都是针对后端存储的单条语句，操作之间没有事务保证。
#[async_trait]
pub trait CaseStorageService: Send + Sync {
    /// 以初始状态创建新案件
    async fn save_new_case(&self, id: &Identifier) -> AppResult<()>;

    /// 按 ID 查找案件，只返回 `spec` 选择的字段
    async fn find_case(&self, id: &Identifier, spec: &CaseRecordSpec) -> AppResult<CaseRecord>;

    /// 查找全部案件，存储为空时返回空列表
    async fn find_all_cases(&self, spec: &CaseRecordSpec) -> AppResult<Vec<CaseRecord>>;

    /// 覆盖已存在案件的全部字段，并更新 `updated_at`
    ///
    /// 案件不存在时返回 `MissingRecord` 写错误，不会插入新行。
    async fn update_case(&self, record: &mut CaseRecord) -> AppResult<()>;

    /// 追加一条案件动作
    async fn save_case_context(&self, action: &CaseAction) -> AppResult<()>;

    /// 按 ID 查找案件动作
    async fn get_case_context(
        &self,
        id: &Identifier,
        spec: &CaseActionSpec,
    ) -> AppResult<CaseAction>;

    /// 某个案件的全部动作，按时间顺序
    async fn get_context_for_case(&self, case_id: &Identifier) -> AppResult<Vec<CaseAction>>;
}

/// 进程内共享的存储句柄
pub type SharedCaseStorage = Arc<dyn CaseStorageService>;
