use super::Relation;
use crate::stmt;

#[derive(Debug, Clone)]
pub struct Field {
    /// The field name, as referenced by requests
    pub name: String,

    /// Column storing the field. For relationship fields this is unused;
    /// the relationship carries its own foreign-key column.
    pub column: String,

    /// Plain column or relationship
    pub ty: FieldTy,

    /// True if the column accepts `NULL`
    pub nullable: bool,
}

/// A field is either a plain column or a relationship, never both.
#[derive(Debug, Clone)]
pub enum FieldTy {
    Primitive(stmt::Type),
    Relation(Relation),
}

impl Field {
    pub fn primitive(name: impl Into<String>, ty: stmt::Type) -> Self {
        let name = name.into();
        Self {
            column: name.clone(),
            name,
            ty: FieldTy::Primitive(ty),
            nullable: false,
        }
    }

    pub fn relation(name: impl Into<String>, relation: Relation) -> Self {
        let name = name.into();
        Self {
            column: name.clone(),
            name,
            ty: FieldTy::Relation(relation),
            nullable: true,
        }
    }

    /// Store the field in a column with a different name.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.ty, FieldTy::Primitive(_))
    }

    pub fn is_relation(&self) -> bool {
        matches!(self.ty, FieldTy::Relation(_))
    }

    pub fn as_relation(&self) -> Option<&Relation> {
        self.ty.as_relation()
    }
}

impl FieldTy {
    pub fn as_primitive(&self) -> Option<&stmt::Type> {
        match self {
            FieldTy::Primitive(ty) => Some(ty),
            FieldTy::Relation(_) => None,
        }
    }

    pub fn as_relation(&self) -> Option<&Relation> {
        match self {
            FieldTy::Relation(relation) => Some(relation),
            FieldTy::Primitive(_) => None,
        }
    }
}
