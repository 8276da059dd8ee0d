use super::Error;

/// A request referenced a field (or column) the entity does not declare.
#[derive(Debug)]
pub(super) struct FieldNotFound {
    entity: Box<str>,
    field: Box<str>,
}

impl std::error::Error for FieldNotFound {}

impl core::fmt::Display for FieldNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "field not found: {}.{}", self.entity, self.field)
    }
}

impl Error {
    pub fn field_not_found(entity: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::FieldNotFound(FieldNotFound {
            entity: entity.into().into(),
            field: field.into().into(),
        }))
    }

    pub fn is_field_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::FieldNotFound(_))
    }
}
