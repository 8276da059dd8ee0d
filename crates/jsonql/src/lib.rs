pub mod db;
pub use db::{Builder, Db, Pool, PoolConfig, PoolConnection};

pub mod engine;
pub use engine::{Engine, ForeignKeyPolicy, Prepared};

mod parse;
pub use parse::{parse, parse_value};

pub mod result;
pub use result::{
    DeleteResult, ExecResult, InsertResult, SelectResult, Skipped, UpdateResult,
};

pub use jsonql_core::{driver, schema, stmt, stmt::Statement, Error, Result, Schema};
