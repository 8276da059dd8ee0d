use jsonql_core::{stmt::Value, Error, Result};
use serde_json::{Map, Value as Json};

/// A JSON node together with its path from the document root.
#[derive(Debug, Clone)]
pub(super) struct Node<'a> {
    pub(super) json: &'a Json,
    pub(super) path: String,
}

impl<'a> Node<'a> {
    pub(super) fn root(json: &'a Json) -> Self {
        Self {
            json,
            path: "$".to_string(),
        }
    }

    pub(super) fn error(&self, message: impl Into<String>) -> Error {
        Error::parse(&self.path, message)
    }

    fn child_path(&self, key: &str) -> String {
        format!("{}.{key}", self.path)
    }

    pub(super) fn object(&self) -> Result<&'a Map<String, Json>> {
        self.json
            .as_object()
            .ok_or_else(|| self.error(format!("expected an object; found {}", kind(self.json))))
    }

    pub(super) fn has(&self, key: &str) -> bool {
        self.json.get(key).is_some()
    }

    /// The member `key`, if present. `null` counts as present.
    pub(super) fn get(&self, key: &str) -> Option<Node<'a>> {
        self.json.get(key).map(|json| Node {
            json,
            path: self.child_path(key),
        })
    }

    pub(super) fn required(&self, key: &str) -> Result<Node<'a>> {
        self.object()?;
        self.get(key).ok_or_else(|| self.missing(key))
    }

    /// The first present member of `keys`; an error naming the first key if
    /// none is.
    pub(super) fn required_any(&self, keys: &[&str]) -> Result<Node<'a>> {
        self.object()?;
        keys.iter()
            .find_map(|key| self.get(key))
            .ok_or_else(|| self.missing(keys[0]))
    }

    pub(super) fn missing(&self, key: &str) -> Error {
        Error::parse(
            self.child_path(key),
            format!("missing required field `{key}`"),
        )
    }

    pub(super) fn str(&self) -> Result<&'a str> {
        self.json
            .as_str()
            .ok_or_else(|| self.error(format!("expected a string; found {}", kind(self.json))))
    }

    pub(super) fn bool(&self) -> Result<bool> {
        self.json
            .as_bool()
            .ok_or_else(|| self.error(format!("expected a boolean; found {}", kind(self.json))))
    }

    /// An integer, accepting numeric strings.
    pub(super) fn i64(&self) -> Result<i64> {
        match self.json {
            Json::Number(n) => n.as_i64(),
            Json::String(s) => s.trim().parse().ok(),
            _ => None,
        }
        .ok_or_else(|| self.error(format!("expected an integer; found {}", kind(self.json))))
    }

    pub(super) fn array(&self) -> Result<Vec<Node<'a>>> {
        let items = self
            .json
            .as_array()
            .ok_or_else(|| self.error(format!("expected an array; found {}", kind(self.json))))?;

        Ok(items
            .iter()
            .enumerate()
            .map(|(i, json)| Node {
                json,
                path: format!("{}[{i}]", self.path),
            })
            .collect())
    }

    /// A scalar value. Arrays and objects are rejected.
    pub(super) fn value(&self) -> Result<Value> {
        Value::from_json(self.json)
            .ok_or_else(|| self.error(format!("expected a scalar value; found {}", kind(self.json))))
    }

    /// An id: a non-null scalar.
    pub(super) fn id(&self) -> Result<Value> {
        match self.value()? {
            Value::Null => Err(self.error("id must not be null")),
            value => Ok(value),
        }
    }

    pub(super) fn optional_str(&self, key: &str) -> Result<Option<&'a str>> {
        match self.get(key) {
            Some(node) if !node.json.is_null() => node.str().map(Some),
            _ => Ok(None),
        }
    }
}

fn kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}
