mod builder;
mod pool;

pub use builder::Builder;
pub use pool::*;

use crate::{engine::Engine, parse, ExecResult, Prepared, Result};

use jsonql_core::{stmt::Statement, Connection, Schema};

use std::sync::Arc;

/// Shared state between all `Db` clones.
#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) engine: Engine,
    pub(crate) pool: Pool,
}

/// A handle to a schema and a connection pool. Executes JSON requests.
///
/// Cloning is cheap; clones share the engine and pool. Each request takes a
/// connection from the pool for the duration of its execution.
#[derive(Debug, Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Parses and executes a JSON request.
    pub async fn exec_json(&self, src: &str) -> Result<ExecResult> {
        let stmt = parse(src)?;
        self.exec(&stmt).await
    }

    /// Executes a statement on a pooled connection.
    ///
    /// The statement is prepared before a connection is taken, so invalid
    /// requests never touch the store.
    pub async fn exec(&self, stmt: &Statement) -> Result<ExecResult> {
        let prepared = self.prepare(stmt)?;
        let mut connection = self.connection().await?;
        self.shared
            .engine
            .exec_prepared(&mut **connection, &prepared)
            .await
    }

    /// Executes a statement on a connection the caller holds, e.g. one with
    /// a transaction open. Writes with nested statements then run inside a
    /// savepoint of that transaction.
    pub async fn exec_on(
        &self,
        connection: &mut dyn Connection,
        stmt: &Statement,
    ) -> Result<ExecResult> {
        self.shared.engine.exec(connection, stmt).await
    }

    /// Compiles a statement to SQL without executing it.
    pub fn prepare(&self, stmt: &Statement) -> Result<Prepared> {
        self.shared.engine.prepare(stmt)
    }

    /// Takes a connection from the pool.
    pub async fn connection(&self) -> Result<PoolConnection> {
        self.shared.pool.get().await
    }

    pub fn schema(&self) -> &Arc<Schema> {
        self.shared.engine.schema()
    }

    pub fn engine(&self) -> &Engine {
        &self.shared.engine
    }
}
