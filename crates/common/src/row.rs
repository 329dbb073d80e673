//! 行到领域对象的映射（按投影字段读取）
//!
//! 对 `sqlx::Row` 泛型，两种引擎共用。未被选择的字段保留默认值。

use chrono::{DateTime, Utc};
use sqlx::{ColumnIndex, Decode, Row, Type};

use crate::projection::{CaseActionField, CaseActionSpec, CaseRecordField, CaseRecordSpec};
use crate::types::{CaseAction, CaseRecord, CaseStatus, Identifier};

pub fn case_record_from_row<'r, R>(
    row: &'r R,
    spec: &CaseRecordSpec,
) -> Result<CaseRecord, sqlx::Error>
where
    R: Row,
    &'static str: ColumnIndex<R>,
    String: Decode<'r, R::Database> + Type<R::Database>,
    Option<String>: Decode<'r, R::Database> + Type<R::Database>,
    DateTime<Utc>: Decode<'r, R::Database> + Type<R::Database>,
{
    let mut record = CaseRecord::with_id(Identifier::new(row.try_get::<String, _>("id")?));

    for field in spec.fields() {
        match field {
            CaseRecordField::Id => {}
            CaseRecordField::Status => record.status = decode_status(row.try_get("status")?)?,
            CaseRecordField::Description => record.description = row.try_get("description")?,
            CaseRecordField::CreatedAt => record.created_at = row.try_get("created_at")?,
            CaseRecordField::UpdatedAt => record.updated_at = row.try_get("updated_at")?,
        }
    }

    Ok(record)
}

pub fn case_action_from_row<'r, R>(
    row: &'r R,
    spec: &CaseActionSpec,
) -> Result<CaseAction, sqlx::Error>
where
    R: Row,
    &'static str: ColumnIndex<R>,
    String: Decode<'r, R::Database> + Type<R::Database>,
    Option<String>: Decode<'r, R::Database> + Type<R::Database>,
    DateTime<Utc>: Decode<'r, R::Database> + Type<R::Database>,
{
    let mut action = CaseAction::with_id(Identifier::new(row.try_get::<String, _>("id")?));

    for field in spec.fields() {
        match field {
            CaseActionField::Id => {}
            CaseActionField::CaseRecordId => {
                action.case_record_id = Identifier::new(row.try_get::<String, _>("case_record_id")?)
            }
            CaseActionField::Action => action.action = row.try_get("action")?,
            CaseActionField::Status => action.status = decode_status(row.try_get("status")?)?,
            CaseActionField::Error => action.error = row.try_get("error")?,
            CaseActionField::CreatedAt => action.created_at = row.try_get("created_at")?,
        }
    }

    Ok(action)
}

fn decode_status(text: String) -> Result<CaseStatus, sqlx::Error> {
    text.parse().map_err(|e| sqlx::Error::Decode(Box::new(e)))
}
