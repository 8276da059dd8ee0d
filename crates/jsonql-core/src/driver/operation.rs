mod transaction;
pub use transaction::Transaction;

use crate::stmt::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Run a statement that reports the number of affected rows
    /// (`UPDATE`, `DELETE`).
    Execute(Sql),

    /// Run an `INSERT` and report the key generated for the new row.
    Insert(Sql),

    /// Run a `SELECT` and return its rows.
    Query(Sql),

    /// Execute a transaction lifecycle op
    Transaction(Transaction),
}

/// SQL text with its positional parameters, fully resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Sql {
    pub text: String,
    pub params: Vec<Value>,
}

impl Operation {
    pub fn sql(&self) -> Option<&Sql> {
        match self {
            Operation::Execute(sql) | Operation::Insert(sql) | Operation::Query(sql) => Some(sql),
            Operation::Transaction(_) => None,
        }
    }

    pub fn is_transaction(&self) -> bool {
        matches!(self, Operation::Transaction(_))
    }
}

impl Sql {
    pub fn new(text: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            text: text.into(),
            params,
        }
    }
}
