use super::Error;

/// An entity with the same (case-insensitive) name is already registered.
#[derive(Debug)]
pub(super) struct DuplicateEntity {
    entity: Box<str>,
}

impl std::error::Error for DuplicateEntity {}

impl core::fmt::Display for DuplicateEntity {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "duplicate entity: {}", self.entity)
    }
}

impl Error {
    pub fn duplicate_entity(entity: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DuplicateEntity(DuplicateEntity {
            entity: entity.into().into(),
        }))
    }

    pub fn is_duplicate_entity(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DuplicateEntity(_))
    }
}
