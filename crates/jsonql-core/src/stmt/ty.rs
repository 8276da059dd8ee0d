use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared value type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    #[serde(alias = "boolean")]
    Bool,

    #[serde(alias = "integer", alias = "int", alias = "bigint")]
    I64,

    #[serde(alias = "real", alias = "float", alias = "double")]
    F64,

    #[serde(alias = "text", alias = "varchar")]
    String,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Type::Bool => "bool",
            Type::I64 => "i64",
            Type::F64 => "f64",
            Type::String => "string",
        })
    }
}
