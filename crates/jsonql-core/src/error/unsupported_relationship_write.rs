use super::Error;

/// A nested write the planner has no cascade for (many-to-many, or creating a
/// parent row from a many-to-one child).
#[derive(Debug)]
pub(super) struct UnsupportedRelationshipWrite {
    entity: Box<str>,
    field: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for UnsupportedRelationshipWrite {}

impl core::fmt::Display for UnsupportedRelationshipWrite {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsupported relationship write: {}.{}; {}",
            self.entity, self.field, self.reason
        )
    }
}

impl Error {
    pub fn unsupported_relationship_write(
        entity: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::UnsupportedRelationshipWrite(
            UnsupportedRelationshipWrite {
                entity: entity.into().into(),
                field: field.into().into(),
                reason: reason.into().into(),
            },
        ))
    }

    pub fn is_unsupported_relationship_write(&self) -> bool {
        matches!(
            self.kind(),
            super::ErrorKind::UnsupportedRelationshipWrite(_)
        )
    }
}
