//! 案件表结构
//!
//! 时间戳以 RFC 3339 文本存储；外键约束依赖连接上开启的 `foreign_keys`。

use casedb_common::Migration;

const CREATE_CASE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS case_records (
    id TEXT PRIMARY KEY NOT NULL,
    status TEXT NOT NULL,
    description TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS case_actions (
    id TEXT PRIMARY KEY NOT NULL,
    case_record_id TEXT NOT NULL REFERENCES case_records (id),
    action TEXT NOT NULL,
    status TEXT NOT NULL,
    error TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_case_actions_case_record_id ON case_actions (case_record_id);
"#;

const DROP_CASE_TABLES: &str = r#"
DROP TABLE IF EXISTS case_actions;
DROP TABLE IF EXISTS case_records;
"#;

/// 全部迁移，按版本排列
pub fn migrations() -> Vec<Migration> {
    vec![Migration::new(1, "create_case_tables", CREATE_CASE_TABLES).with_down(DROP_CASE_TABLES)]
}
