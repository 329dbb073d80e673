//! 案件表的 SQL 语句
//!
//! 两种引擎只在参数占位符写法上不同。

use crate::projection::{CaseActionSpec, CaseRecordSpec};

/// 参数占位符风格
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `$1`（PostgreSQL）
    Dollar,
    /// `?1`（SQLite）
    Question,
}

impl Placeholder {
    fn nth(self, n: usize) -> String {
        match self {
            Placeholder::Dollar => format!("${}", n),
            Placeholder::Question => format!("?{}", n),
        }
    }

    fn list(self, count: usize) -> String {
        (1..=count).map(|n| self.nth(n)).collect::<Vec<_>>().join(", ")
    }
}

/// 按占位符风格生成的语句集合
#[derive(Debug, Clone, Copy)]
pub struct CaseStatements {
    placeholder: Placeholder,
}

impl CaseStatements {
    pub const fn new(placeholder: Placeholder) -> Self {
        Self { placeholder }
    }

    pub fn insert_case(&self) -> String {
        format!(
            "INSERT INTO case_records (id, status, description, created_at, updated_at) VALUES ({})",
            self.placeholder.list(5)
        )
    }

    pub fn select_case(&self, spec: &CaseRecordSpec) -> String {
        format!(
            "SELECT {} FROM case_records WHERE id = {}",
            spec.select_list(),
            self.placeholder.nth(1)
        )
    }

    pub fn select_all_cases(&self, spec: &CaseRecordSpec) -> String {
        format!(
            "SELECT {} FROM case_records ORDER BY created_at, id",
            spec.select_list()
        )
    }

    /// 参数顺序：id, status, description, updated_at
    pub fn update_case(&self) -> String {
        let p = |n| self.placeholder.nth(n);
        format!(
            "UPDATE case_records SET status = {}, description = {}, updated_at = {} WHERE id = {}",
            p(2),
            p(3),
            p(4),
            p(1)
        )
    }

    pub fn insert_action(&self) -> String {
        format!(
            "INSERT INTO case_actions (id, case_record_id, action, status, error, created_at) VALUES ({})",
            self.placeholder.list(6)
        )
    }

    pub fn select_action(&self, spec: &CaseActionSpec) -> String {
        format!(
            "SELECT {} FROM case_actions WHERE id = {}",
            spec.select_list(),
            self.placeholder.nth(1)
        )
    }

    pub fn select_actions_for_case(&self, spec: &CaseActionSpec) -> String {
        format!(
            "SELECT {} FROM case_actions WHERE case_record_id = {} ORDER BY created_at, id",
            spec.select_list(),
            self.placeholder.nth(1)
        )
    }
}
