use super::Entity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cardinality and direction between two entities. Decides which side stores
/// the foreign key, and therefore the order rows are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationKind {
    OneToMany,
    ManyToOne,
    ManyToMany,
    OneToOne,
}

#[derive(Debug, Clone)]
pub struct Relation {
    pub kind: RelationKind,

    /// Name of the related entity
    pub target: String,

    /// Foreign-key column. Lives on the target for one-to-many, on the source
    /// for many-to-one. When unset, the `<entity>_id` convention applies.
    pub foreign_key: Option<String>,

    /// For one-to-one: true when this side stores the foreign key.
    pub owning: bool,

    /// Link table, many-to-many only
    pub join_table: Option<JoinTable>,

    /// Name of the paired field on the target, if the relationship is
    /// bidirectional
    pub inverse: Option<String>,
}

/// Link table of a many-to-many relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinTable {
    pub table: String,

    /// Column referencing the source entity's id
    pub source_column: String,

    /// Column referencing the target entity's id
    pub target_column: String,
}

impl Relation {
    pub fn new(kind: RelationKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            foreign_key: None,
            owning: matches!(kind, RelationKind::ManyToOne),
            join_table: None,
            inverse: None,
        }
    }

    pub fn one_to_many(target: impl Into<String>) -> Self {
        Self::new(RelationKind::OneToMany, target)
    }

    pub fn many_to_one(target: impl Into<String>) -> Self {
        Self::new(RelationKind::ManyToOne, target)
    }

    pub fn many_to_many(target: impl Into<String>, join_table: JoinTable) -> Self {
        Self {
            join_table: Some(join_table),
            ..Self::new(RelationKind::ManyToMany, target)
        }
    }

    pub fn one_to_one(target: impl Into<String>, owning: bool) -> Self {
        Self {
            owning,
            ..Self::new(RelationKind::OneToOne, target)
        }
    }

    pub fn foreign_key(mut self, column: impl Into<String>) -> Self {
        self.foreign_key = Some(column.into());
        self
    }

    pub fn inverse(mut self, field: impl Into<String>) -> Self {
        self.inverse = Some(field.into());
        self
    }

    /// True when the foreign key is stored on the declaring entity's table.
    pub fn owns_foreign_key(&self) -> bool {
        match self.kind {
            RelationKind::ManyToOne => true,
            RelationKind::OneToOne => self.owning,
            RelationKind::OneToMany | RelationKind::ManyToMany => false,
        }
    }

    /// The foreign-key column: the explicit mapping if one was declared,
    /// otherwise `<referenced entity>_id`.
    ///
    /// `source` is the entity declaring this relationship. When the source
    /// owns the key the column references the target, otherwise it references
    /// the source.
    pub fn foreign_key_column(&self, source: &Entity) -> String {
        if let Some(column) = &self.foreign_key {
            return column.clone();
        }

        let referenced = if self.owns_foreign_key() {
            &self.target
        } else {
            &source.name
        };

        format!("{}_id", referenced.to_lowercase())
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RelationKind::OneToMany => "one-to-many",
            RelationKind::ManyToOne => "many-to-one",
            RelationKind::ManyToMany => "many-to-many",
            RelationKind::OneToOne => "one-to-one",
        })
    }
}
