use super::Error;

/// Error when an entity description is invalid.
///
/// This occurs when:
/// - A relationship targets an entity that was never registered
/// - A many-to-many relationship does not declare its join table
/// - The schema document cannot be deserialized
///
/// These errors are raised once, when the registry is built at startup.
/// Foreign-key columns are not checked here; a missing one surfaces as
/// `ForeignKeyUnresolved` when a request is planned.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidSchema(_))
    }
}
