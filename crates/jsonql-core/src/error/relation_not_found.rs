use super::Error;

/// A field was used as a relationship (nested statements) but the entity does
/// not declare it as one.
#[derive(Debug)]
pub(super) struct RelationNotFound {
    entity: Box<str>,
    field: Box<str>,
}

impl std::error::Error for RelationNotFound {}

impl core::fmt::Display for RelationNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "relation not found: {}.{} is not a declared relationship",
            self.entity, self.field
        )
    }
}

impl Error {
    pub fn relation_not_found(entity: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::RelationNotFound(RelationNotFound {
            entity: entity.into().into(),
            field: field.into().into(),
        }))
    }

    pub fn is_relation_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::RelationNotFound(_))
    }
}
