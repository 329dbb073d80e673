//! casedb-errors - 统一错误处理
//!
//! 存储层的错误分类：未找到、读失败、写失败（含约束冲突子类）、配置错误

use std::fmt;

use sqlx::error::ErrorKind;
use thiserror::Error;

/// 写操作失败的具体原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteErrorKind {
    /// 主键已存在
    Duplicate,
    /// 外键引用的记录不存在
    ForeignKeyViolation,
    /// 要更新的记录不存在
    MissingRecord,
    /// 其他被存储拒绝的写入（约束、连接失败等）
    Rejected,
}

impl fmt::Display for WriteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Duplicate => "duplicate",
            Self::ForeignKeyViolation => "foreign key violation",
            Self::MissingRecord => "missing record",
            Self::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage read error: {0}")]
    StorageRead(String),

    #[error("Storage write error ({kind}): {message}")]
    StorageWrite {
        kind: WriteErrorKind,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn storage_read(msg: impl Into<String>) -> Self {
        Self::StorageRead(msg.into())
    }

    pub fn storage_write(kind: WriteErrorKind, msg: impl Into<String>) -> Self {
        Self::StorageWrite {
            kind,
            message: msg.into(),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// 将读路径上的 sqlx 错误归类
    ///
    /// `RowNotFound` 视为未找到，其余均为读失败。
    pub fn from_read(err: sqlx::Error, context: &str) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound(context.to_string()),
            other => Self::StorageRead(format!("{}: {}", context, other)),
        }
    }

    /// 将写路径上的 sqlx 错误归类，区分唯一约束与外键约束冲突
    pub fn from_write(err: sqlx::Error, context: &str) -> Self {
        let kind = match &err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation => WriteErrorKind::Duplicate,
                ErrorKind::ForeignKeyViolation => WriteErrorKind::ForeignKeyViolation,
                _ => WriteErrorKind::Rejected,
            },
            _ => WriteErrorKind::Rejected,
        };
        Self::StorageWrite {
            kind,
            message: format!("{}: {}", context, err),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn write_kind(&self) -> Option<WriteErrorKind> {
        match self {
            Self::StorageWrite { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        self.write_kind() == Some(WriteErrorKind::ForeignKeyViolation)
    }

    /// 用于日志和指标的简短分类名
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::StorageRead(_) => "read_error",
            Self::StorageWrite { .. } => "write_error",
            Self::Configuration(_) => "configuration_error",
        }
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
