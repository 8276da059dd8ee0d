use jsonql::{
    driver::{
        operation::{Operation, Transaction},
        Connection, Driver, Response,
    },
    Result,
};
use jsonql_core::{async_trait, err};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

/// Wraps a driver and records every operation its connections execute.
#[derive(Debug)]
pub struct LoggingDriver {
    inner: Box<dyn Driver>,
    ops: Arc<Mutex<Vec<Operation>>>,
    fail_commit: Arc<AtomicBool>,
}

#[derive(Debug)]
struct LoggingConnection {
    inner: Box<dyn Connection>,
    ops: Arc<Mutex<Vec<Operation>>>,
    fail_commit: Arc<AtomicBool>,
}

/// Operations recorded by a [`LoggingDriver`], oldest first.
pub struct ExecLog {
    ops: Arc<Mutex<Vec<Operation>>>,
    fail_commit: Arc<AtomicBool>,
}

impl LoggingDriver {
    pub fn new(driver: Box<dyn Driver>) -> Self {
        Self {
            inner: driver,
            ops: Arc::default(),
            fail_commit: Arc::default(),
        }
    }

    pub fn log(&self) -> ExecLog {
        ExecLog {
            ops: self.ops.clone(),
            fail_commit: self.fail_commit.clone(),
        }
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    async fn connect(&self) -> Result<Box<dyn Connection>> {
        Ok(Box::new(LoggingConnection {
            inner: self.inner.connect().await?,
            ops: self.ops.clone(),
            fail_commit: self.fail_commit.clone(),
        }))
    }

    fn max_connections(&self) -> Option<usize> {
        self.inner.max_connections()
    }
}

#[async_trait]
impl Connection for LoggingConnection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        self.ops.lock().unwrap().push(op.clone());

        // The store never sees the failed commit; its transaction stays open
        if op == Operation::Transaction(Transaction::Commit)
            && self.fail_commit.swap(false, Ordering::SeqCst)
        {
            return Err(err!("commit failed: database is locked"));
        }

        self.inner.exec(op).await
    }

    fn is_autocommit(&self) -> bool {
        self.inner.is_autocommit()
    }
}

impl ExecLog {
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// Makes the next `COMMIT` fail without reaching the store.
    pub fn fail_next_commit(&self) {
        self.fail_commit.store(true, Ordering::SeqCst);
    }

    pub fn clear(&mut self) {
        self.ops.lock().unwrap().clear();
    }

    /// All recorded operations.
    pub fn ops(&self) -> Vec<Operation> {
        self.ops.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Operation) -> bool) -> usize {
        self.ops.lock().unwrap().iter().filter(|op| predicate(op)).count()
    }

    pub fn has_transaction(&self) -> bool {
        self.count(Operation::is_transaction) > 0
    }
}
