use super::{Engine, Prepared, Slot};
use crate::result::{DeleteResult, ExecResult, InsertResult, SelectResult, UpdateResult};

use jsonql_core::{
    driver::{
        operation::{Operation, Sql, Transaction},
        Connection, Rows, ValueSet,
    },
    err,
    stmt::{Value, ValueRecord},
    Error, Result,
};
use jsonql_sql::{PreparedSql, StatementKind};
use tracing::{debug, info, warn};

/// What running a statement tree wrote.
#[derive(Debug, Default)]
struct Outcome {
    main_rows: u64,
    main_id: Option<Value>,
    nested_rows: u64,
    nested_ids: Vec<Value>,
    statements: usize,
}

/// Transaction scope around a statement group.
#[derive(Debug, Clone, Copy)]
enum Group {
    /// The connection was in autocommit mode; the group owns a transaction
    Transaction,

    /// The caller already has a transaction open; the group runs inside a
    /// savepoint of it
    Savepoint(usize),
}

impl Engine {
    /// Runs a prepared statement on `connection`.
    pub async fn exec_prepared(
        &self,
        connection: &mut dyn Connection,
        prepared: &Prepared,
    ) -> Result<ExecResult> {
        match prepared {
            Prepared::Select { sql, shape, page } => {
                let records = exec_select(connection, sql, shape).await?;
                Ok(ExecResult::Select(SelectResult {
                    total_count: records.len() as u64,
                    records,
                    page_size: page.limit(),
                    page_number: page.number(),
                }))
            }
            Prepared::Insert { sql, skipped } => {
                let outcome = self.exec_group(connection, sql).await?;
                Ok(ExecResult::Insert(InsertResult {
                    affected_rows: outcome.main_rows + outcome.nested_rows,
                    main_generated_ids: outcome.main_id.into_iter().collect(),
                    nested_generated_ids: outcome.nested_ids,
                    skipped: skipped.clone(),
                }))
            }
            Prepared::Update { sql, skipped } => {
                let outcome = self.exec_group(connection, sql).await?;
                Ok(ExecResult::Update(UpdateResult {
                    affected_rows: outcome.main_rows + outcome.nested_rows,
                    main_affected_rows: outcome.main_rows,
                    nested_affected_rows: outcome.nested_rows,
                    skipped: skipped.clone(),
                }))
            }
            Prepared::Delete { sql } => {
                let params = bind(sql, None)?;
                let (affected_rows, _) = exec_statement(connection, sql, params).await?;
                Ok(ExecResult::Delete(DeleteResult { affected_rows }))
            }
        }
    }

    /// Runs a write and its nested statements as one unit. Either all of
    /// them take effect or none do.
    async fn exec_group(
        &self,
        connection: &mut dyn Connection,
        sql: &PreparedSql,
    ) -> Result<Outcome> {
        if sql.nested.is_empty() {
            return exec_tree(connection, sql).await;
        }

        let group = if connection.is_autocommit() {
            Group::Transaction
        } else {
            Group::Savepoint(self.next_savepoint())
        };

        connection.exec(group.begin().into()).await?;

        // A failed commit leaves the group open, so it rolls back like any
        // other failure
        let res = async {
            let outcome = exec_tree(&mut *connection, sql).await?;
            for op in group.commit() {
                connection.exec(op.into()).await?;
            }
            Ok::<_, Error>(outcome)
        }
        .await;

        match res {
            Ok(outcome) => {
                info!(
                    statements = outcome.statements,
                    affected_rows = outcome.main_rows + outcome.nested_rows,
                    "committed statement group"
                );
                Ok(outcome)
            }
            Err(err) => {
                warn!(error = %err, "statement group failed; rolling back");

                for op in group.rollback() {
                    if let Err(rollback_err) = connection.exec(op.into()).await {
                        warn!(error = %rollback_err, "rollback failed");
                        break;
                    }
                }

                Err(err)
            }
        }
    }
}

impl Group {
    fn begin(self) -> Transaction {
        match self {
            Group::Transaction => Transaction::Start,
            Group::Savepoint(id) => Transaction::Savepoint(id),
        }
    }

    fn commit(self) -> Vec<Transaction> {
        match self {
            Group::Transaction => vec![Transaction::Commit],
            Group::Savepoint(id) => vec![Transaction::ReleaseSavepoint(id)],
        }
    }

    /// Rolling back to a savepoint leaves it open, so it is released after.
    fn rollback(self) -> Vec<Transaction> {
        match self {
            Group::Transaction => vec![Transaction::Rollback],
            Group::Savepoint(id) => vec![
                Transaction::RollbackToSavepoint(id),
                Transaction::ReleaseSavepoint(id),
            ],
        }
    }
}

/// Runs `root` then its nested statements, depth first and in order. Each
/// statement's pending parameters take its parent's id.
async fn exec_tree(connection: &mut dyn Connection, root: &PreparedSql) -> Result<Outcome> {
    let mut outcome = Outcome::default();
    let mut stack = vec![(root, None::<Value>, true)];

    while let Some((stmt, parent_id, is_root)) = stack.pop() {
        let Some(params) = stmt.bind(parent_id.as_ref()) else {
            warn!(
                sql = %stmt.sql,
                "parent row has no generated id; skipping nested statement"
            );
            continue;
        };

        let (rows, generated) = exec_statement(connection, stmt, params).await?;
        outcome.statements += 1;

        // A statement that wrote nothing has no row for children to link to
        let id = if rows > 0 {
            stmt.id.clone().or(generated)
        } else {
            None
        };

        if is_root {
            outcome.main_rows = rows;
            outcome.main_id = id.clone();
        } else {
            outcome.nested_rows += rows;
            if stmt.kind == StatementKind::Insert {
                outcome.nested_ids.extend(id.clone());
            }
        }

        if id.is_none() && !stmt.nested.is_empty() {
            warn!(
                sql = %stmt.sql,
                rows,
                "row was not written; skipping its nested statements"
            );
            continue;
        }

        for nested in stmt.nested.iter().rev() {
            stack.push((nested, id.clone(), false));
        }
    }

    Ok(outcome)
}

fn bind(stmt: &PreparedSql, parent_id: Option<&Value>) -> Result<Vec<Value>> {
    stmt.bind(parent_id)
        .ok_or_else(|| err!("statement waits on a parent id but has no parent: {}", stmt.sql))
}

/// Sends one write to the driver. Returns the affected row count and the
/// generated key, if any.
async fn exec_statement(
    connection: &mut dyn Connection,
    stmt: &PreparedSql,
    params: Vec<Value>,
) -> Result<(u64, Option<Value>)> {
    debug!(sql = %stmt.sql, params = params.len(), "exec");

    let sql = Sql::new(&stmt.sql, params);
    let op = match stmt.kind {
        StatementKind::Insert => Operation::Insert(sql),
        StatementKind::Update | StatementKind::Delete => Operation::Execute(sql),
        StatementKind::Select => Operation::Query(sql),
    };

    let res = connection.exec(op).await?;

    Ok(match res.rows {
        Rows::Inserted(inserted) => (inserted.count, inserted.id),
        rows => (rows.affected(), None),
    })
}

async fn exec_select(
    connection: &mut dyn Connection,
    stmt: &PreparedSql,
    shape: &[Slot],
) -> Result<Vec<ValueRecord>> {
    let params = bind(stmt, None)?;
    debug!(sql = %stmt.sql, params = params.len(), "query");

    let res = connection
        .exec(Operation::Query(Sql::new(&stmt.sql, params)))
        .await?;

    let Rows::Values(values) = res.rows else {
        return Err(err!("expected rows from query; got {:?}", res.rows));
    };

    shape_records(values, shape)
}

/// Builds one record per row. Columns of a joined relationship are folded
/// into a record nested under the relationship field; a join that matched
/// nothing yields `null` there.
fn shape_records(values: ValueSet, shape: &[Slot]) -> Result<Vec<ValueRecord>> {
    if values.columns.len() != shape.len() {
        return Err(err!(
            "query returned {} columns; expected {}",
            values.columns.len(),
            shape.len()
        ));
    }

    let records = values
        .rows
        .into_iter()
        .map(|row| {
            let mut record = ValueRecord::new();

            for (slot, value) in shape.iter().zip(row) {
                match slot {
                    Slot::Field(name) => record.insert(name.clone(), value),
                    Slot::Nested { field, key } => {
                        let nested = record
                            .entry(field.clone())
                            .or_insert_with(|| Value::Record(ValueRecord::new()));

                        if let Value::Record(nested) = nested {
                            nested.insert(key.clone(), value);
                        }
                    }
                }
            }

            for value in record.values_mut() {
                if matches!(value, Value::Record(nested) if nested.is_all_null()) {
                    *value = Value::Null;
                }
            }

            record
        })
        .collect();

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(name: &str) -> Slot {
        Slot::Field(name.to_string())
    }

    fn nested(field: &str, key: &str) -> Slot {
        Slot::Nested {
            field: field.to_string(),
            key: key.to_string(),
        }
    }

    #[test]
    fn folds_joined_columns() {
        let values = ValueSet {
            columns: vec!["id".into(), "name".into(), "blogs_id".into(), "blogs_title".into()],
            rows: vec![
                vec![1.into(), "tom".into(), 10.into(), "t1".into()],
                vec![2.into(), "ann".into(), Value::Null, Value::Null],
            ],
        };
        let shape = [slot("id"), slot("name"), nested("blogs", "id"), nested("blogs", "title")];

        let records = shape_records(values, &shape).unwrap();
        assert_eq!(records.len(), 2);

        let blog = records[0]["blogs"].expect_record();
        assert_eq!(blog["id"], Value::I64(10));
        assert_eq!(blog["title"], Value::from("t1"));
        assert_eq!(
            records[0].keys().collect::<Vec<_>>(),
            ["id", "name", "blogs"]
        );

        assert_eq!(records[1]["blogs"], Value::Null);
    }

    #[test]
    fn column_count_mismatch() {
        let values = ValueSet {
            columns: vec!["id".into()],
            rows: vec![],
        };
        assert!(shape_records(values, &[slot("id"), slot("name")]).is_err());
    }

    #[test]
    fn savepoint_rollback_releases() {
        assert_eq!(
            Group::Savepoint(3).rollback(),
            [
                Transaction::RollbackToSavepoint(3),
                Transaction::ReleaseSavepoint(3)
            ]
        );
        assert_eq!(Group::Transaction.commit(), [Transaction::Commit]);
    }
}
