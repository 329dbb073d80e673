//! 数据库迁移定义
//!
//! 迁移本身与引擎无关，由各个适配器的 MigrationManager 负责执行

use sha2::{Digest, Sha256};

/// 迁移定义
#[derive(Debug, Clone)]
pub struct Migration {
    /// 版本号
    pub version: i64,
    /// 名称
    pub name: String,
    /// 升级 SQL（可包含多条语句）
    pub up_sql: String,
    /// 降级 SQL（可选）
    pub down_sql: Option<String>,
    /// 校验和
    pub checksum: String,
}

impl Migration {
    /// 创建新的迁移
    pub fn new(version: i64, name: impl Into<String>, up_sql: impl Into<String>) -> Self {
        let up_sql = up_sql.into();
        let checksum = Self::calculate_checksum(&up_sql);
        Self {
            version,
            name: name.into(),
            up_sql,
            down_sql: None,
            checksum,
        }
    }

    /// 设置降级 SQL
    pub fn with_down(mut self, down_sql: impl Into<String>) -> Self {
        self.down_sql = Some(down_sql.into());
        self
    }

    fn calculate_checksum(sql: &str) -> String {
        hex::encode(Sha256::digest(sql.as_bytes()))
    }
}

/// 迁移结果
#[derive(Debug, Clone, Default)]
pub struct MigrationResult {
    /// 已应用的迁移版本
    pub applied: Vec<i64>,
    /// 跳过的迁移版本
    pub skipped: Vec<i64>,
    /// 错误
    pub errors: Vec<MigrationError>,
}

impl MigrationResult {
    /// 是否成功
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// 应用的迁移数量
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    /// 汇总错误信息
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("v{} {}: {}", e.version, e.name, e.error))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// 迁移错误
#[derive(Debug, Clone)]
pub struct MigrationError {
    pub version: i64,
    pub name: String,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_creation() {
        let migration = Migration::new(1, "create_cases", "CREATE TABLE cases (id TEXT)")
            .with_down("DROP TABLE cases");

        assert_eq!(migration.version, 1);
        assert_eq!(migration.name, "create_cases");
        assert!(migration.down_sql.is_some());
        assert_eq!(migration.checksum.len(), 64);
    }

    #[test]
    fn test_checksum_tracks_sql() {
        let m1 = Migration::new(1, "test", "CREATE TABLE t1 (id INT)");
        let m2 = Migration::new(1, "test", "CREATE TABLE t1 (id INT)");
        let m3 = Migration::new(1, "test", "CREATE TABLE t2 (id INT)");

        assert_eq!(m1.checksum, m2.checksum);
        assert_ne!(m1.checksum, m3.checksum);
    }

    #[test]
    fn test_migration_result_summary() {
        let result = MigrationResult {
            applied: vec![1],
            skipped: vec![],
            errors: vec![MigrationError {
                version: 2,
                name: "add_index".to_string(),
                error: "boom".to_string(),
            }],
        };
        assert!(!result.is_success());
        assert_eq!(result.error_summary(), "v2 add_index: boom");
    }
}
