mod column;
pub use column::Column;

mod delete;
pub use delete::Delete;

mod expr;
pub use expr::{
    BinaryOp, Expr, ExprBetween, ExprBinaryOp, ExprExists, ExprInList, ExprInSubquery, ExprIs,
    ExprIsNull, ExprLike,
};

mod insert;
pub use insert::Insert;

mod param;
pub use param::Param;

mod select;
pub use select::{Join, Limit, OrderBy, Select, SelectItem, TableRef};

mod update;
pub use update::{Assignment, Update};

pub use jsonql_core::stmt::{Direction, Value};

/// A single SQL statement, ready to be serialized.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Statement::Select(value)
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Statement::Insert(value)
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Statement::Update(value)
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Statement::Delete(value)
    }
}
