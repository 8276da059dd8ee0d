mod adhoc;
mod connection_pool;
mod driver;
mod duplicate_entity;
mod entity_not_found;
mod field_not_found;
mod foreign_key_unresolved;
mod invalid_schema;
mod parse;
mod relation_not_found;
mod sql_build;
mod unsupported_relationship_write;

use adhoc::AdhocError;
use connection_pool::ConnectionPoolError;
use driver::DriverError;
use duplicate_entity::DuplicateEntity;
use entity_not_found::EntityNotFound;
use field_not_found::FieldNotFound;
use foreign_key_unresolved::ForeignKeyUnresolved;
use invalid_schema::InvalidSchema;
use parse::ParseError;
use relation_not_found::RelationNotFound;
use sql_build::SqlBuildError;
use std::sync::Arc;
use unsupported_relationship_write::UnsupportedRelationshipWrite;

/// Return early with an ad-hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Build an ad-hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur while parsing, planning or executing a request.
///
/// The error is a single pointer wide. The kind is private; callers inspect
/// it through the `is_*` predicates.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context
    /// is shown first, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let kind = match consequent.inner {
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => inner.kind,
                Err(shared) => ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string())),
            },
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }

    /// Returns `true` if the error, or any error in its context chain, is a
    /// schema error (unknown entity, duplicate entity, unknown field or
    /// undeclared relationship).
    pub fn is_schema_error(&self) -> bool {
        self.chain().any(|err| {
            matches!(
                err.kind(),
                ErrorKind::EntityNotFound(_)
                    | ErrorKind::DuplicateEntity(_)
                    | ErrorKind::FieldNotFound(_)
                    | ErrorKind::RelationNotFound(_)
            )
        })
    }

    /// Returns `true` if the error is a persist planning error.
    pub fn is_plan_error(&self) -> bool {
        self.chain().any(|err| {
            matches!(
                err.kind(),
                ErrorKind::ForeignKeyUnresolved(_) | ErrorKind::UnsupportedRelationshipWrite(_)
            )
        })
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Driver(err) => Some(err),
            ErrorKind::ConnectionPool(err) => Some(err),
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    Parse(ParseError),
    EntityNotFound(EntityNotFound),
    DuplicateEntity(DuplicateEntity),
    FieldNotFound(FieldNotFound),
    RelationNotFound(RelationNotFound),
    ForeignKeyUnresolved(ForeignKeyUnresolved),
    UnsupportedRelationshipWrite(UnsupportedRelationshipWrite),
    InvalidSchema(InvalidSchema),
    SqlBuild(SqlBuildError),
    Driver(DriverError),
    ConnectionPool(ConnectionPoolError),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            Parse(err) => core::fmt::Display::fmt(err, f),
            EntityNotFound(err) => core::fmt::Display::fmt(err, f),
            DuplicateEntity(err) => core::fmt::Display::fmt(err, f),
            FieldNotFound(err) => core::fmt::Display::fmt(err, f),
            RelationNotFound(err) => core::fmt::Display::fmt(err, f),
            ForeignKeyUnresolved(err) => core::fmt::Display::fmt(err, f),
            UnsupportedRelationshipWrite(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
            SqlBuild(err) => core::fmt::Display::fmt(err, f),
            Driver(err) => core::fmt::Display::fmt(err, f),
            ConnectionPool(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown jsonql error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::parse("$", err.to_string())
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}
