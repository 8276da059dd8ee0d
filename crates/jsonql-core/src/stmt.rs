mod condition;
pub use condition::{
    CmpOp, Condition, ConditionBetween, ConditionComparison, ConditionIn, ConditionLike,
    ConditionLogical, ConditionNull, ConditionSubquery, LogicalOp,
};

mod delete;
pub use delete::Delete;

mod persist;
pub use persist::{Assignment, FieldValue, Insert, Nested, Update};

mod select;
pub use select::{Direction, Page, Select, Sort};

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;

mod value_record;
pub use value_record::ValueRecord;

/// A parsed request. One variant per `statement` discriminator.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

impl Statement {
    /// Name of the entity the statement targets, as written in the request.
    pub fn entity(&self) -> &str {
        match self {
            Statement::Select(stmt) => &stmt.entity,
            Statement::Insert(stmt) => &stmt.entity,
            Statement::Update(stmt) => &stmt.entity,
            Statement::Delete(stmt) => &stmt.entity,
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Statement::Select(_))
    }

    pub fn is_write(&self) -> bool {
        !self.is_select()
    }
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
