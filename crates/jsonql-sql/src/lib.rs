pub mod prepared;
pub use prepared::{PreparedSql, StatementKind};

pub mod serializer;
pub use serializer::{Params, Placeholder, Serializer};

pub mod stmt;
pub use stmt::{Param, Statement};
