use super::Operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    /// Start a transaction
    Start,

    /// Commit a transaction
    Commit,

    /// Rollback a transaction
    Rollback,

    /// Open a savepoint inside an already running transaction
    Savepoint(usize),

    /// Release (keep) the work done since the savepoint
    ReleaseSavepoint(usize),

    /// Discard the work done since the savepoint
    RollbackToSavepoint(usize),
}

impl From<Transaction> for Operation {
    fn from(value: Transaction) -> Operation {
        Operation::Transaction(value)
    }
}
