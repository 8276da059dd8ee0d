use super::{Entity, Field, RelationKind, Schema};
use crate::{Error, Result};

/// A resolved foreign key of a relationship.
#[derive(Debug, Clone)]
pub struct ForeignKey<'a> {
    /// Entity whose table stores the column
    pub owner: &'a Entity,

    /// Entity whose primary key the column references
    pub referenced: &'a Entity,

    pub column: String,

    /// True when the column lives on the entity declaring the relationship
    pub on_source: bool,
}

impl Schema {
    /// Resolves the foreign key of the relationship `field`, declared on
    /// `source`.
    ///
    /// The column is the explicit mapping if there is one. A relationship
    /// whose key lives on the target may instead name an `inverse` field on
    /// the target, whose mapping is then used. Otherwise the
    /// `<referenced entity>_id` convention applies.
    ///
    /// Fails with `ForeignKeyUnresolved` if the owning entity has no such
    /// column.
    pub fn foreign_key<'a>(&'a self, source: &'a Entity, field: &Field) -> Result<ForeignKey<'a>> {
        let Some(relation) = field.as_relation() else {
            return Err(Error::relation_not_found(&source.name, &field.name));
        };

        if relation.kind == RelationKind::ManyToMany {
            return Err(Error::unsupported_relationship_write(
                &source.name,
                &field.name,
                "many-to-many relationships link through a join table, not a foreign key",
            ));
        }

        let target = self.lookup(&relation.target)?;
        let on_source = relation.owns_foreign_key();

        let (owner, referenced) = if on_source {
            (source, target)
        } else {
            (target, source)
        };

        let inverse = relation
            .inverse
            .as_deref()
            .filter(|_| !on_source)
            .and_then(|name| target.field_by_name(name))
            .and_then(Field::as_relation)
            .filter(|inverse| inverse.owns_foreign_key());

        let column = match (&relation.foreign_key, inverse) {
            (Some(column), _) => column.clone(),
            (None, Some(inverse)) => inverse.foreign_key_column(target),
            (None, None) => relation.foreign_key_column(source),
        };

        if !owner.has_column(&column) {
            return Err(Error::foreign_key_unresolved(
                &source.name,
                &field.name,
                &owner.name,
                &column,
            ));
        }

        Ok(ForeignKey {
            owner,
            referenced,
            column,
            on_source,
        })
    }
}
