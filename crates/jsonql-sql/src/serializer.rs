#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited};

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod expr;
mod statement;
mod value;

use crate::{
    prepared::{PreparedSql, StatementKind},
    stmt::{Param, Statement},
};

use jsonql_core::driver::operation::Transaction;

/// Serialize a statement to a SQL string.
///
/// Identifiers are double-quoted and parameters are written as `?`. The
/// output targets the ANSI subset SQLite, PostgreSQL and MySQL (in ANSI
/// mode) all accept.
#[derive(Debug, Default, Clone, Copy)]
pub struct Serializer {
    _priv: (),
}

struct Formatter<'a, T> {
    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);

        ret
    }

    /// Serializes `stmt` and collects its parameters.
    pub fn prepare(&self, stmt: &Statement) -> PreparedSql {
        let mut params = Vec::<Param>::new();
        let sql = self.serialize(stmt, &mut params);

        let kind = match stmt {
            Statement::Select(_) => StatementKind::Select,
            Statement::Insert(_) => StatementKind::Insert,
            Statement::Update(_) => StatementKind::Update,
            Statement::Delete(_) => StatementKind::Delete,
        };

        PreparedSql::new(kind, sql, params)
    }

    /// Serialize a transaction control operation to a SQL string.
    ///
    /// Savepoints are named `sp_{id}`.
    pub fn serialize_transaction(&self, op: &Transaction) -> String {
        match op {
            Transaction::Start => "BEGIN".to_string(),
            Transaction::Commit => "COMMIT".to_string(),
            Transaction::Rollback => "ROLLBACK".to_string(),
            Transaction::Savepoint(id) => format!("SAVEPOINT sp_{id}"),
            Transaction::ReleaseSavepoint(id) => format!("RELEASE SAVEPOINT sp_{id}"),
            Transaction::RollbackToSavepoint(id) => format!("ROLLBACK TO SAVEPOINT sp_{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::{Column, Delete, Expr, ExprIs, Value};

    fn delete_where(filter: Expr) -> String {
        let stmt = Statement::Delete(Delete {
            table: "user".to_string(),
            filter,
        });
        let mut params = Vec::<Param>::new();
        Serializer::new().serialize(&stmt, &mut params)
    }

    #[test]
    fn identifiers_are_quoted() {
        let sql = delete_where(Expr::eq(Column::new("we\"ird"), Param::from(1)));
        assert_eq!(sql, r#"DELETE FROM "user" WHERE "we""ird" = ?"#);
    }

    #[test]
    fn is_literal_is_written_inline() {
        let sql = delete_where(
            ExprIs {
                expr: Box::new(Column::new("name").into()),
                value: Value::from("o'brien"),
                negate: true,
            }
            .into(),
        );
        assert_eq!(sql, r#"DELETE FROM "user" WHERE "name" IS NOT 'o''brien'"#);
    }

    #[test]
    fn nested_boolean_lists_are_parenthesized() {
        let a = Expr::eq(Column::new("a"), Param::from(1));
        let b = Expr::eq(Column::new("b"), Param::from(2));
        let c = Expr::eq(Column::new("c"), Param::from(3));

        let sql = delete_where(Expr::And(vec![a, Expr::Or(vec![b, c])]));
        assert_eq!(
            sql,
            r#"DELETE FROM "user" WHERE "a" = ? AND ("b" = ? OR "c" = ?)"#
        );
    }

    #[test]
    fn constant_conditions() {
        assert_eq!(delete_where(Expr::Bool(false)), r#"DELETE FROM "user" WHERE 1 = 0"#);
        assert_eq!(delete_where(Expr::Or(vec![])), r#"DELETE FROM "user" WHERE 1 = 0"#);
        assert_eq!(delete_where(Expr::And(vec![])), r#"DELETE FROM "user" WHERE 1 = 1"#);
    }

    #[test]
    fn transaction_control() {
        let serializer = Serializer::new();
        assert_eq!(serializer.serialize_transaction(&Transaction::Start), "BEGIN");
        assert_eq!(
            serializer.serialize_transaction(&Transaction::Savepoint(2)),
            "SAVEPOINT sp_2"
        );
        assert_eq!(
            serializer.serialize_transaction(&Transaction::RollbackToSavepoint(2)),
            "ROLLBACK TO SAVEPOINT sp_2"
        );
    }
}
