use super::{Type, ValueRecord};
use serde::{Serialize, Serializer};
use std::fmt;

/// A scalar value read from a request or returned by the store.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Null value
    #[default]
    Null,

    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit float
    F64(f64),

    String(String),

    /// Ordered name to value mapping. Only produced when folding joined
    /// relationship columns into a select result.
    Record(ValueRecord),
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_record(&self) -> &ValueRecord {
        match self {
            Self::Record(record) => record,
            _ => panic!("expected record; actual={self:#?}"),
        }
    }

    /// Converts a JSON scalar. Arrays and objects are not values and return
    /// `None`.
    pub fn from_json(src: &serde_json::Value) -> Option<Value> {
        use serde_json::Value as Json;

        Some(match src {
            Json::Null => Value::Null,
            Json::Bool(v) => Value::Bool(*v),
            Json::Number(n) => match n.as_i64() {
                Some(v) => Value::I64(v),
                None => Value::F64(n.as_f64()?),
            },
            Json::String(v) => Value::String(v.clone()),
            Json::Array(_) | Json::Object(_) => return None,
        })
    }

    /// Converts the value to `ty` when the conversion loses nothing, e.g. the
    /// string `"7"` to the integer `7`. Anything else is returned unchanged
    /// and left to the store to accept or reject.
    pub fn coerce(self, ty: Type) -> Value {
        match (ty, self) {
            (Type::I64, Value::String(s)) => match s.trim().parse::<i64>() {
                Ok(v) => Value::I64(v),
                Err(_) => Value::String(s),
            },
            (Type::I64, Value::F64(v)) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
                Value::I64(v as i64)
            }
            (Type::F64, Value::I64(v)) => Value::F64(v as f64),
            (Type::F64, Value::String(s)) => match s.trim().parse::<f64>() {
                Ok(v) => Value::F64(v),
                Err(_) => Value::String(s),
            },
            (Type::Bool, Value::I64(0)) => Value::Bool(false),
            (Type::Bool, Value::I64(1)) => Value::Bool(true),
            (Type::Bool, Value::String(s)) => match &s[..] {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::String(s),
            },
            (Type::String, Value::I64(v)) => Value::String(v.to_string()),
            (_, value) => value,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Record(record) => record.serialize(serializer),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v:?}"),
            Value::Record(record) => write!(f, "{record:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src.into())
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<ValueRecord> for Value {
    fn from(src: ValueRecord) -> Self {
        Self::Record(src)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}
