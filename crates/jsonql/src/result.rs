use jsonql_core::stmt::{Value, ValueRecord};
use serde::Serialize;

/// Outcome of one executed request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "statement", rename_all = "camelCase")]
pub enum ExecResult {
    Insert(InsertResult),
    Update(UpdateResult),
    Delete(DeleteResult),
    Select(SelectResult),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    /// Rows written by the root statement and every nested statement
    pub affected_rows: u64,

    /// Key of the root row, if the store produced one
    pub main_generated_ids: Vec<Value>,

    /// Keys of rows created by nested inserts, in execution order
    pub nested_generated_ids: Vec<Value>,

    /// Nested branches dropped because their foreign key did not resolve
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<Skipped>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub affected_rows: u64,
    pub main_affected_rows: u64,
    pub nested_affected_rows: u64,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<Skipped>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub affected_rows: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectResult {
    pub records: Vec<ValueRecord>,
    pub total_count: u64,
    pub page_size: i64,
    pub page_number: i64,
}

/// A nested branch that was not written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skipped {
    /// Entity declaring the relationship
    pub entity: String,

    /// Relationship field
    pub field: String,

    pub reason: String,
}

impl ExecResult {
    /// Total rows written, or rows returned for a select.
    pub fn affected_rows(&self) -> u64 {
        match self {
            ExecResult::Insert(res) => res.affected_rows,
            ExecResult::Update(res) => res.affected_rows,
            ExecResult::Delete(res) => res.affected_rows,
            ExecResult::Select(res) => res.total_count,
        }
    }

    #[track_caller]
    pub fn into_insert(self) -> InsertResult {
        match self {
            ExecResult::Insert(res) => res,
            _ => panic!("expected insert result; actual={self:#?}"),
        }
    }

    #[track_caller]
    pub fn into_update(self) -> UpdateResult {
        match self {
            ExecResult::Update(res) => res,
            _ => panic!("expected update result; actual={self:#?}"),
        }
    }

    #[track_caller]
    pub fn into_delete(self) -> DeleteResult {
        match self {
            ExecResult::Delete(res) => res,
            _ => panic!("expected delete result; actual={self:#?}"),
        }
    }

    #[track_caller]
    pub fn into_select(self) -> SelectResult {
        match self {
            ExecResult::Select(res) => res,
            _ => panic!("expected select result; actual={self:#?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_camel_case_with_tag() {
        let res = ExecResult::Insert(InsertResult {
            affected_rows: 2,
            main_generated_ids: vec![Value::I64(1)],
            nested_generated_ids: vec![Value::I64(5)],
            skipped: vec![],
        });

        assert_eq!(
            serde_json::to_value(&res).unwrap(),
            json!({
                "statement": "insert",
                "affectedRows": 2,
                "mainGeneratedIds": [1],
                "nestedGeneratedIds": [5],
            })
        );
    }
}
