use super::Value;

/// Delete one row by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub entity: String,
    pub id: Value,
}
