mod value;
pub(crate) use value::Value;

use jsonql_core::{
    async_trait,
    driver::{
        operation::{Operation, Sql},
        Driver, Response, ValueSet,
    },
    err, stmt, Error, Result,
};
use jsonql_sql::Serializer;
use rusqlite::Connection as RusqliteConnection;
use std::path::{Path, PathBuf};
use tracing::trace;
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver from a connection URL: `sqlite::memory:`
    /// or `sqlite:<path>`.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver)?;

        if url.scheme() != "sqlite" {
            return Err(err!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            ));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

#[async_trait]
impl Driver for Sqlite {
    async fn connect(&self) -> Result<Box<dyn jsonql_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }

    fn max_connections(&self) -> Option<usize> {
        matches!(self, Self::InMemory).then_some(1)
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
        Ok(Self { connection })
    }

    /// Runs one or more `;`-separated statements without parameters, e.g.
    /// table definitions.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.connection.execute_batch(sql).map_err(Error::driver)
    }

    fn execute(&self, sql: &Sql) -> Result<usize> {
        let params = bind(sql);
        let mut stmt = self
            .connection
            .prepare_cached(&sql.text)
            .map_err(Error::driver)?;

        stmt.execute(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver)
    }

    fn query(&self, sql: &Sql) -> Result<ValueSet> {
        let params = bind(sql);
        let mut stmt = self
            .connection
            .prepare_cached(&sql.text)
            .map_err(Error::driver)?;

        let columns = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        let width = columns.len();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver)?;

        let mut ret = vec![];

        while let Some(row) = rows.next().map_err(Error::driver)? {
            let values = (0..width)
                .map(|index| Value::from_sql(row, index).map(Value::into_inner))
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(Error::driver)?;

            ret.push(values);
        }

        Ok(ValueSet { columns, rows: ret })
    }
}

#[async_trait]
impl jsonql_core::Connection for Connection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::Transaction(op) => {
                let sql = Serializer::new().serialize_transaction(&op);
                trace!(sql = %sql, "transaction");

                self.connection.execute_batch(&sql).map_err(Error::driver)?;
                Ok(Response::count(0))
            }
            Operation::Execute(sql) => {
                let count = self.execute(&sql)?;
                Ok(Response::count(count as u64))
            }
            Operation::Insert(sql) => {
                let count = self.execute(&sql)?;

                // The rowid is only the new row's when this statement wrote one
                let id = (count > 0).then(|| stmt::Value::I64(self.connection.last_insert_rowid()));
                Ok(Response::inserted(count as u64, id))
            }
            Operation::Query(sql) => Ok(Response::values(self.query(&sql)?)),
        }
    }

    fn is_autocommit(&self) -> bool {
        self.connection.is_autocommit()
    }
}

fn bind(sql: &Sql) -> Vec<Value> {
    sql.params.iter().cloned().map(Value::from).collect()
}
