use super::{Params, ToSql};

use crate::stmt::{Param, Value};

impl ToSql for &Param {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let placeholder = f.params.push(self);
        fmt!(f, placeholder);
    }
}

/// A value written inline into the SQL text.
pub(super) struct Literal<'a>(pub(super) &'a Value);

impl ToSql for Literal<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        use std::fmt::Write;

        match self.0 {
            Value::Null => f.dst.push_str("NULL"),
            Value::Bool(true) => f.dst.push_str("TRUE"),
            Value::Bool(false) => f.dst.push_str("FALSE"),
            Value::I64(v) => {
                let _ = write!(f.dst, "{v}");
            }
            Value::F64(v) => {
                let _ = write!(f.dst, "{v:?}");
            }
            Value::String(v) => {
                f.dst.push('\'');
                for ch in v.chars() {
                    if ch == '\'' {
                        f.dst.push('\'');
                    }
                    f.dst.push(ch);
                }
                f.dst.push('\'');
            }
            // Records only appear in query results
            Value::Record(_) => f.dst.push_str("NULL"),
        }
    }
}
