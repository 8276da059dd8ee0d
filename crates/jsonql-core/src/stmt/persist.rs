use super::Value;

/// Create a row, and any nested rows described by relationship fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub entity: String,

    /// Client-supplied id for the new row
    pub data_id: Option<Value>,

    pub fields: Vec<Assignment>,
}

/// Modify the row identified by `data_id`, and write any nested rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub entity: String,
    pub data_id: Value,
    pub fields: Vec<Assignment>,
}

/// One `{"field": ..., "value" | "values": ...}` entry of a write request.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub field: String,
    pub value: FieldValue,
}

/// Either a literal or a list of nested statements. The parser rejects
/// entries carrying both or neither, so every assignment is one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(Value),
    Nested(Vec<Nested>),
}

/// A nested write payload inside a relationship field.
#[derive(Debug, Clone, PartialEq)]
pub struct Nested {
    /// Target entity. Defaults to the relationship target when omitted.
    pub entity: Option<String>,

    /// Id of an existing row. A payload with an id and no other fields is a
    /// reference to that row.
    pub data_id: Option<Value>,

    pub fields: Vec<Assignment>,
}

impl Assignment {
    pub fn scalar(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: FieldValue::Scalar(value.into()),
        }
    }

    pub fn nested(field: impl Into<String>, values: Vec<Nested>) -> Self {
        Self {
            field: field.into(),
            value: FieldValue::Nested(values),
        }
    }

    pub fn as_scalar(&self) -> Option<&Value> {
        match &self.value {
            FieldValue::Scalar(value) => Some(value),
            FieldValue::Nested(_) => None,
        }
    }
}

impl Nested {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: Some(entity.into()),
            data_id: None,
            fields: vec![],
        }
    }

    pub fn field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push(Assignment::scalar(field, value));
        self
    }

    /// The id of the referenced row if the payload only identifies an
    /// existing row: a `dataId` and no fields, or a single `id` field (named
    /// by `primary_key`).
    pub fn reference_id(&self, primary_key: &str) -> Option<&Value> {
        match (&self.data_id, &self.fields[..]) {
            (Some(id), []) => Some(id),
            (None, [only]) if only.field.eq_ignore_ascii_case(primary_key) => only.as_scalar(),
            _ => None,
        }
    }
}
