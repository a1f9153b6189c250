//! Error types for inisql.

use std::fmt;

/// The main error type for inisql operations.
#[derive(Debug)]
pub enum Error {
    /// Malformed statement shape for the matched verb, or an empty statement
    Syntax(String),

    /// The statement verb is not one of SELECT/INSERT/UPDATE/DELETE/DROP
    UnsupportedOperation(String),

    /// The referenced section does not exist
    NotFound(String),

    /// Requested keys absent from a section, in request order
    KeyNotFound(Vec<String>),

    /// DROP OPTION target is missing from its section
    OptionNotFound {
        /// Option (key) name
        option: String,
        /// Section that was searched
        section: String,
    },

    /// A bound parameter's type disagrees with its placeholder
    TypeMismatch {
        /// Zero-based parameter index
        position: usize,
        /// Placeholder text, e.g. `%i`
        placeholder: String,
        /// Type the placeholder requires
        expected: String,
        /// Type that was supplied
        found: String,
    },

    /// Placeholder and parameter counts differ
    Arity {
        /// Placeholders found in the statement
        placeholders: usize,
        /// Parameters supplied by the caller
        parameters: usize,
    },

    /// I/O error
    Io(std::io::Error),

    /// The backing file could not be parsed
    Parse {
        /// One-based line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// Input rejected by validation
    InvalidInput(String),

    /// A lock was poisoned (internal error)
    LockPoisoned,
}

/// Discriminant of [`Error`], for callers that only need to branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::Syntax`]
    Syntax,
    /// See [`Error::UnsupportedOperation`]
    UnsupportedOperation,
    /// See [`Error::NotFound`]
    NotFound,
    /// See [`Error::KeyNotFound`]
    KeyNotFound,
    /// See [`Error::OptionNotFound`]
    OptionNotFound,
    /// See [`Error::TypeMismatch`]
    TypeMismatch,
    /// See [`Error::Arity`]
    Arity,
    /// See [`Error::Io`]
    Io,
    /// See [`Error::Parse`]
    Parse,
    /// See [`Error::InvalidInput`]
    InvalidInput,
    /// See [`Error::LockPoisoned`]
    LockPoisoned,
}

impl Error {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Syntax(_) => ErrorKind::Syntax,
            Error::UnsupportedOperation(_) => ErrorKind::UnsupportedOperation,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::KeyNotFound(_) => ErrorKind::KeyNotFound,
            Error::OptionNotFound { .. } => ErrorKind::OptionNotFound,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::Arity { .. } => ErrorKind::Arity,
            Error::Io(_) => ErrorKind::Io,
            Error::Parse { .. } => ErrorKind::Parse,
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::LockPoisoned => ErrorKind::LockPoisoned,
        }
    }

    pub(crate) fn syntax(msg: impl Into<String>) -> Self {
        Error::Syntax(msg.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Syntax(msg) => write!(f, "Syntax error: {}", msg),
            Error::UnsupportedOperation(verb) => write!(f, "Unsupported operation: {}", verb),
            Error::NotFound(section) => write!(f, "Section {} not found", section),
            Error::KeyNotFound(keys) => write!(f, "Keys not found: {}", keys.join(", ")),
            Error::OptionNotFound { option, section } => {
                write!(f, "Option {} not found in {}", option, section)
            }
            Error::TypeMismatch {
                position,
                placeholder,
                expected,
                found,
            } => write!(
                f,
                "Type mismatch: parameter {} bound to {} must be {}, got {}",
                position, placeholder, expected, found
            ),
            Error::Arity {
                placeholders,
                parameters,
            } => write!(
                f,
                "Arity error: {} placeholders but {} parameters",
                placeholders, parameters
            ),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Parse { line, message } => write!(f, "Parse error at line {}: {}", line, message),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::LockPoisoned => write!(f, "Lock poisoned"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// A specialized `Result` type for inisql operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_not_found_lists_every_key() {
        let err = Error::KeyNotFound(vec!["b".to_string(), "c".to_string()]);
        assert_eq!(err.to_string(), "Keys not found: b, c");
        assert_eq!(err.kind(), ErrorKind::KeyNotFound);
    }

    #[test]
    fn test_io_error_has_source() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::Other, "disk gone").into();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(std::error::Error::source(&err).is_some());
    }
}
