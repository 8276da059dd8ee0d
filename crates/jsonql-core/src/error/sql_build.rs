use super::Error;

/// An internal invariant was violated while building SQL. Should not happen
/// once schema resolution and planning succeeded.
#[derive(Debug)]
pub(super) struct SqlBuildError {
    message: Box<str>,
}

impl std::error::Error for SqlBuildError {}

impl core::fmt::Display for SqlBuildError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "failed to build SQL: {}", self.message)
    }
}

impl Error {
    pub fn sql_build(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::SqlBuild(SqlBuildError {
            message: message.into().into(),
        }))
    }

    pub fn is_sql_build(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::SqlBuild(_))
    }
}
