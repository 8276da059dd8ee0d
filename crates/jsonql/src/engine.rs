mod compile;
pub use compile::{compile, CompiledSelect, Slot};

mod emit;
pub use emit::{emit, emit_delete, emit_select};

mod exec;

mod plan;
pub use plan::{ForeignKeyPolicy, PlannedPersist, Planner};

use crate::result::{ExecResult, Skipped};

use jsonql_core::{
    driver::Connection,
    stmt::{Page, Statement},
    Result, Schema,
};
use jsonql_sql::{PreparedSql, Serializer};

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tracing::debug;

/// Compiles statements to SQL and runs them on a connection.
///
/// The engine holds no connection of its own; every call is handed the
/// connection to run on. One engine is shared by all requests.
#[derive(Debug)]
pub struct Engine {
    /// The schema statements are resolved against
    pub(crate) schema: Arc<Schema>,

    policy: ForeignKeyPolicy,

    serializer: Serializer,

    /// Source of savepoint names for groups run inside a caller's
    /// transaction
    savepoints: AtomicUsize,
}

/// A statement compiled to SQL, with what is needed to shape its result.
#[derive(Debug, Clone, PartialEq)]
pub enum Prepared {
    Select {
        sql: PreparedSql,
        shape: Vec<Slot>,
        page: Page,
    },
    Insert {
        sql: PreparedSql,
        skipped: Vec<Skipped>,
    },
    Update {
        sql: PreparedSql,
        skipped: Vec<Skipped>,
    },
    Delete {
        sql: PreparedSql,
    },
}

impl Engine {
    pub fn new(schema: Arc<Schema>, policy: ForeignKeyPolicy) -> Self {
        Self {
            schema,
            policy,
            serializer: Serializer::new(),
            savepoints: AtomicUsize::new(0),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn policy(&self) -> ForeignKeyPolicy {
        self.policy
    }

    /// Resolves, plans and serializes a statement. Nothing is sent to the
    /// store, so every schema and planning error surfaces here.
    pub fn prepare(&self, stmt: &Statement) -> Result<Prepared> {
        Ok(match stmt {
            Statement::Select(select) => {
                let compiled = compile(&self.schema, select)?;
                Prepared::Select {
                    sql: emit_select(&self.serializer, &compiled),
                    shape: compiled.shape,
                    page: compiled.page,
                }
            }
            Statement::Insert(insert) => {
                let mut planner = Planner::new(&self.schema, self.policy);
                let planned = planner.plan_insert(insert)?;
                Prepared::Insert {
                    sql: emit(&self.serializer, &planned),
                    skipped: planner.into_skipped(),
                }
            }
            Statement::Update(update) => {
                let mut planner = Planner::new(&self.schema, self.policy);
                let planned = planner.plan_update(update)?;
                Prepared::Update {
                    sql: emit(&self.serializer, &planned),
                    skipped: planner.into_skipped(),
                }
            }
            Statement::Delete(delete) => Prepared::Delete {
                sql: emit_delete(&self.schema, &self.serializer, delete)?,
            },
        })
    }

    /// Prepares and runs `stmt` on `connection`.
    pub async fn exec(
        &self,
        connection: &mut dyn Connection,
        stmt: &Statement,
    ) -> Result<ExecResult> {
        debug!(
            statement = emit::describe(stmt),
            entity = stmt.entity(),
            "executing request"
        );

        let prepared = self.prepare(stmt)?;
        self.exec_prepared(connection, &prepared).await
    }

    fn next_savepoint(&self) -> usize {
        self.savepoints.fetch_add(1, Ordering::Relaxed)
    }
}

impl Prepared {
    /// The root SQL statement.
    pub fn sql(&self) -> &PreparedSql {
        match self {
            Prepared::Select { sql, .. }
            | Prepared::Insert { sql, .. }
            | Prepared::Update { sql, .. }
            | Prepared::Delete { sql } => sql,
        }
    }
}
