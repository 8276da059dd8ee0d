//! Connection pooling for database connections.

use std::ops::{Deref, DerefMut};

pub use deadpool::managed::Timeouts;
use deadpool::managed::RecycleError;
use jsonql_core::{
    driver::{operation::Transaction, Driver},
    err, Connection, Error,
};
use tracing::warn;

use crate::Result;

/// Get the default maximum size of a pool, which is `cpu_core_count * 2`
/// including logical cores (Hyper-Threading).
fn get_default_pool_max_size() -> usize {
    deadpool::managed::PoolConfig::default().max_size
}

/// Configuration for connection pool behavior.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_size: usize,
    pub timeouts: Timeouts,
}

impl PoolConfig {
    /// Creates a new pool configuration with default settings.
    pub fn new() -> Self {
        Self {
            max_size: get_default_pool_max_size(),
            timeouts: Default::default(),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A connection pool over a [`Driver`].
#[derive(Debug)]
pub struct Pool {
    inner: deadpool::managed::Pool<Manager>,
}

impl Pool {
    /// Creates a new connection pool from the given driver.
    ///
    /// The driver's own connection limit, if it has one, caps
    /// `config.max_size`. One connection is opened eagerly so that an
    /// unreachable store fails here rather than on the first request.
    pub async fn new(driver: impl Driver, config: PoolConfig) -> Result<Self> {
        let max_size = match driver.max_connections() {
            Some(max_connections) => config.max_size.min(max_connections),
            None => config.max_size,
        };

        let inner = deadpool::managed::Pool::builder(Manager {
            driver: Box::new(driver),
        })
        .runtime(deadpool::Runtime::Tokio1)
        .max_size(max_size.max(1))
        .timeouts(config.timeouts)
        .build()
        .map_err(Error::connection_pool)?;

        let _connection = inner.get().await.map_err(Error::connection_pool)?;

        Ok(Self { inner })
    }

    /// Retrieves a connection from the pool.
    pub async fn get(&self) -> Result<PoolConnection> {
        let connection = self
            .inner
            .get()
            .await
            .map_err(Error::connection_pool)?;
        Ok(PoolConnection { inner: connection })
    }

    /// Maximum number of connections the pool opens.
    pub fn max_size(&self) -> usize {
        self.inner.status().max_size
    }
}

#[derive(Debug)]
struct Manager {
    driver: Box<dyn Driver>,
}

impl deadpool::managed::Manager for Manager {
    type Type = Box<dyn Connection>;
    type Error = Error;

    async fn create(&self) -> Result<Self::Type> {
        self.driver.connect().await
    }

    /// A connection handed back with a transaction still open (a failed
    /// rollback, or a caller that never finished its own transaction) has
    /// that transaction rolled back before it is reused. If it cannot be
    /// rolled back, the connection is discarded.
    async fn recycle(
        &self,
        obj: &mut Self::Type,
        _metrics: &deadpool::managed::Metrics,
    ) -> deadpool::managed::RecycleResult<Self::Error> {
        if obj.is_autocommit() {
            return Ok(());
        }

        warn!("pooled connection has an open transaction; rolling it back");
        obj.exec(Transaction::Rollback.into()).await?;

        if obj.is_autocommit() {
            Ok(())
        } else {
            Err(RecycleError::Backend(err!(
                "connection is still inside a transaction after rollback"
            )))
        }
    }
}

/// A connection retrieved from a pool.
///
/// When dropped, the connection is returned to the pool for reuse.
pub struct PoolConnection {
    inner: deadpool::managed::Object<Manager>,
}

impl Deref for PoolConnection {
    type Target = Box<dyn Connection>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for PoolConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
