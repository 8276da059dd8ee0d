mod response;
pub use response::{Inserted, Response, Rows, ValueSet};

pub mod operation;
pub use operation::{Operation, Sql};

use crate::{async_trait, Result};

use std::fmt::Debug;

/// Opens connections to a store. The pool holds one driver and asks it for
/// new connections as needed.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Creates a new connection to the store.
    async fn connect(&self) -> Result<Box<dyn Connection>>;

    /// Upper bound on simultaneously open connections, if the store has one
    /// (an in-memory SQLite database only exists on its one connection).
    fn max_connections(&self) -> Option<usize> {
        None
    }
}

/// One open connection. Used by exactly one request at a time.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Execute a database operation
    async fn exec(&mut self, op: Operation) -> Result<Response>;

    /// True when no explicit transaction is open on the connection.
    fn is_autocommit(&self) -> bool;
}
