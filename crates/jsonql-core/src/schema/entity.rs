use super::{Field, FieldTy, Relation, RelationKind};
use crate::{stmt, Error, Result};
use indexmap::IndexMap;

/// Describes one entity: the table it maps to and its fields.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Name of the entity, as used by `entityId` in requests
    pub name: String,

    /// Table the entity is stored in
    pub table: String,

    /// Column holding the row id
    pub primary_key: String,

    /// Fields in declaration order
    pub fields: Vec<Field>,

    /// Related entity name (lower-cased) to relationship kind
    pub relations: IndexMap<String, RelationKind>,
}

impl Entity {
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            primary_key: "id".to_string(),
            fields: vec![],
            relations: IndexMap::new(),
        }
    }

    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = column.into();
        self
    }

    /// Appends a field descriptor.
    pub fn field(mut self, field: Field) -> Self {
        if let FieldTy::Relation(relation) = &field.ty {
            self.relations
                .insert(relation.target.to_lowercase(), relation.kind);
        }

        self.fields.push(field);
        self
    }

    /// Shorthand for a non-nullable primitive field stored in a column of
    /// the same name.
    pub fn primitive(self, name: &str, ty: stmt::Type) -> Self {
        self.field(Field::primitive(name, ty))
    }

    pub fn relation(self, name: &str, relation: Relation) -> Self {
        self.field(Field::relation(name, relation))
    }

    /// Finds a field by name. An exact match wins over a case-insensitive
    /// one.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .or_else(|| {
                self.fields
                    .iter()
                    .find(|field| field.name.eq_ignore_ascii_case(name))
            })
    }

    /// Like [`Entity::field_by_name`], failing with `FieldNotFound`.
    pub fn resolve_field(&self, name: &str) -> Result<&Field> {
        self.field_by_name(name)
            .ok_or_else(|| Error::field_not_found(&self.name, name))
    }

    /// Returns the primitive field stored in `column`.
    pub fn field_by_column(&self, column: &str) -> Option<&Field> {
        self.columns()
            .find(|field| field.column.eq_ignore_ascii_case(column))
    }

    /// True if the table has `column`: the primary key, a primitive field's
    /// column, or the foreign key of a relationship stored on this table.
    pub fn has_column(&self, column: &str) -> bool {
        column.eq_ignore_ascii_case(&self.primary_key)
            || self.field_by_column(column).is_some()
            || self.relations().any(|(_, relation)| {
                relation.owns_foreign_key()
                    && relation.foreign_key_column(self).eq_ignore_ascii_case(column)
            })
    }

    /// Primitive fields, in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.iter().filter(|field| field.is_primitive())
    }

    /// `(name, column)` pairs read when a request names no fields: the
    /// primary key, unless a field already maps it, then every primitive
    /// field.
    pub fn default_projection(&self) -> Vec<(&str, &str)> {
        let mut projection = vec![];

        if self.field_by_column(&self.primary_key).is_none() {
            projection.push((&self.primary_key[..], &self.primary_key[..]));
        }

        projection.extend(
            self.columns()
                .map(|field| (&field.name[..], &field.column[..])),
        );
        projection
    }

    /// Relationship fields, in declaration order.
    pub fn relations(&self) -> impl Iterator<Item = (&Field, &Relation)> + '_ {
        self.fields
            .iter()
            .filter_map(|field| field.as_relation().map(|relation| (field, relation)))
    }

    /// Type of the primary key column. Defaults to `I64` when the key column
    /// is not declared as a field.
    pub fn primary_key_ty(&self) -> &stmt::Type {
        self.field_by_column(&self.primary_key)
            .and_then(|field| field.ty.as_primitive())
            .unwrap_or(&stmt::Type::I64)
    }
}
