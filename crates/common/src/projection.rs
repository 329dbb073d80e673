//! 字段投影
//!
//! 读取时只选择调用方指定的字段。字段集合是封闭的枚举，
//! 按名字构造时会校验，未知字段名直接报错。

use std::collections::BTreeSet;
use std::fmt;

use casedb_errors::{AppError, AppResult};

/// 实体的可投影字段
pub trait EntityField: Copy + Ord + fmt::Debug + 'static {
    /// 实体名（用于错误信息）
    const ENTITY: &'static str;
    /// 全部字段，按列顺序
    const ALL: &'static [Self];
    /// 标识字段，总是被选中
    const KEY: Self;

    /// 对应的列名（snake_case）
    fn column(self) -> &'static str;

    /// 按名字查找字段，接受 snake_case / camelCase / PascalCase
    fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize(name);
        Self::ALL
            .iter()
            .copied()
            .find(|field| normalize(field.column()) == wanted)
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// 一次读取请求选择的字段集合
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec<F: EntityField> {
    fields: BTreeSet<F>,
}

impl<F: EntityField> FieldSpec<F> {
    /// 选择全部字段
    pub fn all() -> Self {
        Self {
            fields: F::ALL.iter().copied().collect(),
        }
    }

    /// 只选择给定字段（标识字段总是包含在内）
    pub fn only(fields: impl IntoIterator<Item = F>) -> Self {
        let mut fields: BTreeSet<F> = fields.into_iter().collect();
        fields.insert(F::KEY);
        Self { fields }
    }

    /// 按字段名构造，未知字段名返回配置错误
    pub fn from_names<I, S>(names: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields = Vec::new();
        for name in names {
            let name = name.as_ref();
            let field = F::from_name(name).ok_or_else(|| {
                AppError::configuration(format!("unknown {} field: {}", F::ENTITY, name))
            })?;
            fields.push(field);
        }
        Ok(Self::only(fields))
    }

    pub fn includes(&self, field: F) -> bool {
        self.fields.contains(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.fields.iter().copied()
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.fields().map(EntityField::column).collect()
    }

    /// SELECT 子句中的列列表
    pub fn select_list(&self) -> String {
        self.columns().join(", ")
    }
}

impl<F: EntityField> Default for FieldSpec<F> {
    fn default() -> Self {
        Self::all()
    }
}

/// 案件记录字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CaseRecordField {
    Id,
    Status,
    Description,
    CreatedAt,
    UpdatedAt,
}

impl EntityField for CaseRecordField {
    const ENTITY: &'static str = "case record";
    const ALL: &'static [Self] = &[
        Self::Id,
        Self::Status,
        Self::Description,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];
    const KEY: Self = Self::Id;

    fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Status => "status",
            Self::Description => "description",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

/// 案件动作字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CaseActionField {
    Id,
    CaseRecordId,
    Action,
    Status,
    Error,
    CreatedAt,
}

impl EntityField for CaseActionField {
    const ENTITY: &'static str = "case action";
    const ALL: &'static [Self] = &[
        Self::Id,
        Self::CaseRecordId,
        Self::Action,
        Self::Status,
        Self::Error,
        Self::CreatedAt,
    ];
    const KEY: Self = Self::Id;

    fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::CaseRecordId => "case_record_id",
            Self::Action => "action",
            Self::Status => "status",
            Self::Error => "error",
            Self::CreatedAt => "created_at",
        }
    }
}

pub type CaseRecordSpec = FieldSpec<CaseRecordField>;
pub type CaseActionSpec = FieldSpec<CaseActionField>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_selects_every_column_in_order() {
        let spec = CaseRecordSpec::all();
        assert_eq!(
            spec.select_list(),
            "id, status, description, created_at, updated_at"
        );
    }

    #[test]
    fn test_only_always_includes_key() {
        let spec = CaseRecordSpec::only([CaseRecordField::Status]);
        assert_eq!(spec.columns(), vec!["id", "status"]);
        assert!(!spec.includes(CaseRecordField::Description));
    }

    #[test]
    fn test_from_names_accepts_several_spellings() {
        let spec = CaseActionSpec::from_names(["CaseRecordID", "createdAt", "error"]).unwrap();
        assert_eq!(spec.columns(), vec!["id", "case_record_id", "error", "created_at"]);
    }

    #[test]
    fn test_from_names_rejects_unknown_field() {
        let err = CaseRecordSpec::from_names(["status", "priority"]).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("priority"));
    }

    #[test]
    fn test_empty_name_list_selects_only_key() {
        let spec = CaseRecordSpec::from_names(Vec::<String>::new()).unwrap();
        assert_eq!(spec.columns(), vec!["id"]);
    }
}
