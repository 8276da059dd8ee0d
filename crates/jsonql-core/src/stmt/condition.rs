use super::{Select, Value};
use std::fmt;

/// Filter tree of a select. Leaves name fields of the selected entity;
/// a dotted name (`blogs.title`) reaches through a relationship.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Comparison(ConditionComparison),
    Logical(ConditionLogical),
    Between(ConditionBetween),
    In(ConditionIn),
    Like(ConditionLike),
    Null(ConditionNull),
    Subquery(ConditionSubquery),
}

/// `field <op> value`
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionComparison {
    pub field: String,
    pub op: CmpOp,
    pub value: Value,
    pub negate: bool,
}

/// Children joined with AND or OR.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionLogical {
    pub op: LogicalOp,
    pub children: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionBetween {
    pub field: String,
    pub start: Value,
    pub end: Value,
    pub negate: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionIn {
    pub field: String,
    pub values: Vec<Value>,
    pub negate: bool,
}

/// Substring match; the pattern is wrapped in `%` when compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionLike {
    pub field: String,
    pub pattern: Value,
    pub negate: bool,
}

/// `field IS NULL`, or `IS NOT NULL` when negated.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionNull {
    pub field: String,
    pub negate: bool,
}

/// With a field: `field IN (inner select)`. Without: `EXISTS (inner select)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionSubquery {
    pub field: Option<String>,
    pub select: Box<Select>,
    pub negate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    /// `IS <literal>`; the value is written inline, not as a parameter
    Is,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogicalOp {
    #[default]
    And,
    Or,
}

impl Condition {
    pub fn comparison(field: impl Into<String>, op: CmpOp, value: impl Into<Value>) -> Self {
        ConditionComparison {
            field: field.into(),
            op,
            value: value.into(),
            negate: false,
        }
        .into()
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::comparison(field, CmpOp::Eq, value)
    }

    pub fn and(children: Vec<Condition>) -> Self {
        ConditionLogical {
            op: LogicalOp::And,
            children,
        }
        .into()
    }

    pub fn or(children: Vec<Condition>) -> Self {
        ConditionLogical {
            op: LogicalOp::Or,
            children,
        }
        .into()
    }

    pub fn in_list(field: impl Into<String>, values: Vec<Value>) -> Self {
        ConditionIn {
            field: field.into(),
            values,
            negate: false,
        }
        .into()
    }

    pub fn like(field: impl Into<String>, pattern: impl Into<Value>) -> Self {
        ConditionLike {
            field: field.into(),
            pattern: pattern.into(),
            negate: false,
        }
        .into()
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        ConditionNull {
            field: field.into(),
            negate: false,
        }
        .into()
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, Condition::Logical(_))
    }
}

impl CmpOp {
    /// Parses a comparison method name (`eq`, `ne`, `gt`, `ge`, `lt`, `le`,
    /// `is`), case-insensitively.
    pub fn from_method(method: &str) -> Option<CmpOp> {
        Some(match &method.to_ascii_lowercase()[..] {
            "eq" => CmpOp::Eq,
            "ne" | "neq" => CmpOp::Ne,
            "gt" => CmpOp::Gt,
            "ge" | "gte" => CmpOp::Ge,
            "lt" => CmpOp::Lt,
            "le" | "lte" => CmpOp::Le,
            "is" => CmpOp::Is,
            _ => return None,
        })
    }
}

impl LogicalOp {
    pub fn parse(src: &str) -> Option<LogicalOp> {
        if src.eq_ignore_ascii_case("and") {
            Some(LogicalOp::And)
        } else if src.eq_ignore_ascii_case("or") {
            Some(LogicalOp::Or)
        } else {
            None
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CmpOp::Eq => "=",
            CmpOp::Ne => "<>",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Is => "IS",
        })
    }
}

macro_rules! impl_from_condition {
    ( $( $variant:ident => $ty:ty ),+ $(,)? ) => {
        $(
            impl From<$ty> for Condition {
                fn from(value: $ty) -> Self {
                    Condition::$variant(value)
                }
            }
        )+
    };
}

impl_from_condition! {
    Comparison => ConditionComparison,
    Logical => ConditionLogical,
    Between => ConditionBetween,
    In => ConditionIn,
    Like => ConditionLike,
    Null => ConditionNull,
    Subquery => ConditionSubquery,
}
