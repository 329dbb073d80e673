//! 案件领域类型定义

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::new_id;

/// 标识符（由调用方分配的不透明字符串）
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[display("{_0}")]
pub struct Identifier(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("identifier must not be empty")]
pub struct EmptyIdentifier;

impl Identifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// 生成一个新的时间有序标识符
    pub fn generate() -> Self {
        Self(new_id().to_string())
    }

    /// 解析并校验标识符（拒绝空白字符串）
    pub fn parse(s: &str) -> Result<Self, EmptyIdentifier> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EmptyIdentifier);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// 案件生命周期状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseStatus {
    /// 新建（创建时的初始状态）
    #[default]
    NewCase,
    Started,
    InProgress,
    Closed,
    Error,
}

impl CaseStatus {
    pub const ALL: [CaseStatus; 5] = [
        CaseStatus::NewCase,
        CaseStatus::Started,
        CaseStatus::InProgress,
        CaseStatus::Closed,
        CaseStatus::Error,
    ];

    /// 存储中使用的文本形式
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::NewCase => "new-case",
            CaseStatus::Started => "started",
            CaseStatus::InProgress => "in-progress",
            CaseStatus::Closed => "closed",
            CaseStatus::Error => "error",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown case status: {0}")]
pub struct UnknownCaseStatus(pub String);

impl FromStr for CaseStatus {
    type Err = UnknownCaseStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CaseStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownCaseStatus(s.to_string()))
    }
}

/// 案件记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: Identifier,
    pub status: CaseStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CaseRecord {
    /// 创建处于初始状态的新案件
    pub fn new(id: Identifier) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: CaseStatus::NewCase,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 只带标识符的记录，其余字段为默认值（用于投影读取）
    pub fn with_id(id: Identifier) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// 案件动作（附加到某个案件的不可变历史事件）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseAction {
    pub id: Identifier,
    pub case_record_id: Identifier,
    pub action: String,
    pub status: CaseStatus,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CaseAction {
    pub fn new(
        id: Identifier,
        case_record_id: Identifier,
        action: impl Into<String>,
        status: CaseStatus,
    ) -> Self {
        Self {
            id,
            case_record_id,
            action: action.into(),
            status,
            error: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_id(id: Identifier) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// 记录动作失败的原因
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}
