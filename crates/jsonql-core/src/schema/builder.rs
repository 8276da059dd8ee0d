use super::{Entity, FieldTy, Relation, Schema};
use crate::Result;

/// Collects entity descriptors and produces a verified [`Schema`].
#[derive(Debug, Default)]
pub struct Builder {
    entities: Vec<Entity>,

    /// If set, prefix all table names with this string
    table_name_prefix: Option<String>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity(&mut self, entity: Entity) -> &mut Self {
        self.entities.push(entity);
        self
    }

    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    pub fn build(&self) -> Result<Schema> {
        let mut schema = Schema::default();

        for entity in &self.entities {
            let mut entity = entity.clone();

            if let Some(prefix) = &self.table_name_prefix {
                entity.table = format!("{prefix}{}", entity.table);

                for field in &mut entity.fields {
                    if let FieldTy::Relation(Relation {
                        join_table: Some(join_table),
                        ..
                    }) = &mut field.ty
                    {
                        join_table.table = format!("{prefix}{}", join_table.table);
                    }
                }
            }

            schema.register(entity)?;
        }

        schema.verify()?;
        Ok(schema)
    }
}
