mod builder;
pub use builder::Builder;

mod config;
pub use config::{EntityDef, FieldDef, JoinTableDef, RelationDef, SchemaDef};

mod entity;
pub use entity::Entity;

mod field;
pub use field::{Field, FieldTy};

mod fk;
pub use fk::ForeignKey;

mod relation;
pub use relation::{JoinTable, Relation, RelationKind};

mod verify;

use crate::{Error, Result};
use indexmap::IndexMap;

/// The schema registry.
///
/// Holds one [`Entity`] per registered name. The registry is populated once,
/// before the first request, and is read-only afterwards, so it is shared
/// between requests behind an `Arc` without any locking.
#[derive(Debug, Default)]
pub struct Schema {
    /// Entities keyed by their lower-cased name.
    entities: IndexMap<String, Entity>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Build a schema from a JSON schema document. See [`SchemaDef`] for the
    /// document format.
    pub fn from_json(src: &str) -> Result<Schema> {
        let def: SchemaDef = serde_json::from_str(src)
            .map_err(|err| Error::invalid_schema(format!("malformed schema document; {err}")))?;
        def.into_builder()?.build()
    }

    /// Adds an entity. Names are unique regardless of case.
    pub fn register(&mut self, entity: Entity) -> Result<()> {
        let key = entity.name.to_lowercase();

        if self.entities.contains_key(&key) {
            return Err(Error::duplicate_entity(entity.name));
        }

        self.entities.insert(key, entity);
        Ok(())
    }

    /// Looks up an entity by name, ignoring case.
    pub fn lookup(&self, name: &str) -> Result<&Entity> {
        self.entities
            .get(&name.to_lowercase())
            .ok_or_else(|| Error::entity_not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(&name.to_lowercase())
    }

    pub fn entities(&self) -> impl ExactSizeIterator<Item = &Entity> {
        self.entities.values()
    }
}
