use super::{Db, Pool, PoolConfig, Shared};
use crate::{engine::Engine, ForeignKeyPolicy, Result};

use jsonql_core::{driver::Driver, err, Schema};

use std::sync::Arc;

/// Configures and builds a [`Db`].
#[derive(Debug, Default)]
pub struct Builder {
    schema: Option<Schema>,
    policy: ForeignKeyPolicy,
    pool: PoolConfig,
}

impl Builder {
    /// The schema requests are resolved against.
    pub fn schema(&mut self, schema: Schema) -> &mut Self {
        self.schema = Some(schema);
        self
    }

    /// Loads the schema from its JSON document form.
    pub fn schema_json(&mut self, src: &str) -> Result<&mut Self> {
        self.schema = Some(Schema::from_json(src)?);
        Ok(self)
    }

    pub fn foreign_key_policy(&mut self, policy: ForeignKeyPolicy) -> &mut Self {
        self.policy = policy;
        self
    }

    pub fn pool_config(&mut self, config: PoolConfig) -> &mut Self {
        self.pool = config;
        self
    }

    /// Opens the connection pool and returns the handle.
    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let Some(schema) = self.schema.take() else {
            return Err(err!("no schema configured; call `Builder::schema` first"));
        };

        let pool = Pool::new(driver, self.pool.clone()).await?;

        Ok(Db {
            shared: Arc::new(Shared {
                engine: Engine::new(Arc::new(schema), self.policy),
                pool,
            }),
        })
    }
}
