use super::Error;

/// The planner could not find the foreign-key column that links a nested
/// statement to its parent.
///
/// Depending on the configured policy this either fails the request or only
/// drops the offending nested branch.
#[derive(Debug)]
pub(super) struct ForeignKeyUnresolved {
    entity: Box<str>,
    field: Box<str>,
    target: Box<str>,
    column: Box<str>,
}

impl std::error::Error for ForeignKeyUnresolved {}

impl core::fmt::Display for ForeignKeyUnresolved {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "foreign key unresolved: {}.{}; {} has no column `{}`",
            self.entity, self.field, self.target, self.column
        )
    }
}

impl Error {
    pub fn foreign_key_unresolved(
        entity: impl Into<String>,
        field: impl Into<String>,
        target: impl Into<String>,
        column: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::ForeignKeyUnresolved(ForeignKeyUnresolved {
            entity: entity.into().into(),
            field: field.into().into(),
            target: target.into().into(),
            column: column.into().into(),
        }))
    }

    pub fn is_foreign_key_unresolved(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ForeignKeyUnresolved(_))
    }
}
