use super::{Builder, Entity, Field, JoinTable, Relation, RelationKind};
use crate::{stmt, Error, Result};
use serde::Deserialize;

/// Schema document, the serialized form of the registry.
///
/// ```json
/// {
///   "entities": [
///     {
///       "name": "user",
///       "table": "users",
///       "fields": [
///         { "name": "id", "type": "integer" },
///         { "name": "name", "type": "text", "nullable": true },
///         { "name": "blogs", "relation": { "kind": "ONE_TO_MANY", "target": "blog" } }
///       ]
///     }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDef {
    pub entities: Vec<EntityDef>,

    #[serde(default, rename = "tableNamePrefix")]
    pub table_name_prefix: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EntityDef {
    pub name: String,
    pub table: Option<String>,
    pub primary_key: Option<String>,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldDef {
    pub name: String,
    pub column: Option<String>,
    #[serde(rename = "type")]
    pub ty: Option<stmt::Type>,
    #[serde(default)]
    pub nullable: bool,
    pub relation: Option<RelationDef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RelationDef {
    pub kind: RelationKind,
    pub target: String,
    pub foreign_key: Option<String>,
    pub owning: Option<bool>,
    pub join_table: Option<JoinTableDef>,
    pub inverse: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JoinTableDef {
    pub table: String,
    pub source_column: String,
    pub target_column: String,
}

impl SchemaDef {
    pub fn into_builder(self) -> Result<Builder> {
        let mut builder = Builder::new();

        if let Some(prefix) = &self.table_name_prefix {
            builder.table_name_prefix(prefix);
        }

        for entity in self.entities {
            builder.entity(entity.into_entity()?);
        }

        Ok(builder)
    }
}

impl EntityDef {
    fn into_entity(self) -> Result<Entity> {
        let table = self.table.unwrap_or_else(|| self.name.clone());
        let mut entity = Entity::new(&self.name, table);

        if let Some(primary_key) = self.primary_key {
            entity = entity.primary_key(primary_key);
        }

        for field in self.fields {
            entity = entity.field(field.into_field(&self.name)?);
        }

        Ok(entity)
    }
}

impl FieldDef {
    fn into_field(self, entity: &str) -> Result<Field> {
        let field = match (self.ty, self.relation) {
            (Some(ty), None) => Field::primitive(&self.name, ty).nullable(self.nullable),
            (None, Some(relation)) => Field::relation(&self.name, relation.into_relation()),
            (Some(_), Some(_)) => {
                return Err(Error::invalid_schema(format!(
                    "{entity}.{} declares both a type and a relation",
                    self.name
                )))
            }
            (None, None) => {
                return Err(Error::invalid_schema(format!(
                    "{entity}.{} declares neither a type nor a relation",
                    self.name
                )))
            }
        };

        Ok(match self.column {
            Some(column) => field.column(column),
            None => field,
        })
    }
}

impl RelationDef {
    fn into_relation(self) -> Relation {
        let mut relation = Relation::new(self.kind, self.target);
        relation.foreign_key = self.foreign_key;
        relation.inverse = self.inverse;

        if let Some(owning) = self.owning {
            relation.owning = owning;
        }

        relation.join_table = self.join_table.map(|def| JoinTable {
            table: def.table,
            source_column: def.source_column,
            target_column: def.target_column,
        });

        relation
    }
}
