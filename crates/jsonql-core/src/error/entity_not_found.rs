use super::Error;

/// A request named an entity that is not in the schema registry.
#[derive(Debug)]
pub(super) struct EntityNotFound {
    entity: Box<str>,
}

impl std::error::Error for EntityNotFound {}

impl core::fmt::Display for EntityNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "entity not found: {}", self.entity)
    }
}

impl Error {
    pub fn entity_not_found(entity: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::EntityNotFound(EntityNotFound {
            entity: entity.into().into(),
        }))
    }

    pub fn is_entity_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::EntityNotFound(_))
    }
}
