use super::Error;

/// A malformed or incomplete request.
///
/// `path` points at the offending JSON node using `$` for the document root,
/// e.g. `$.fields[2].values[0].entityId`.
#[derive(Debug)]
pub(super) struct ParseError {
    path: Box<str>,
    message: Box<str>,
}

impl std::error::Error for ParseError {}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "parse error at {}: {}", self.path, self.message)
    }
}

impl Error {
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Parse(ParseError {
            path: path.into().into(),
            message: message.into().into(),
        }))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Parse(_))
    }
}
