use super::Value;
use indexmap::IndexMap;
use serde::Serialize;
use std::ops;

/// Column name to value mapping that preserves column order.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValueRecord {
    fields: IndexMap<String, Value>,
}

impl ValueRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// True when every field is `NULL`. A left join that matched no row
    /// produces such a record.
    pub fn is_all_null(&self) -> bool {
        self.fields.values().all(Value::is_null)
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.fields
    }
}

impl ops::Deref for ValueRecord {
    type Target = IndexMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.fields
    }
}

impl ops::DerefMut for ValueRecord {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.fields
    }
}

impl FromIterator<(String, Value)> for ValueRecord {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValueRecord {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
