//! Error types for Placelite.

use std::fmt;

/// The main error type for Placelite operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error while reading or writing the store
    Io(std::io::Error),

    /// Serialization/deserialization error
    Serialization(String),

    /// A required table file is missing from the store directory
    MissingTable(String),

    /// A table file is present but unreadable (bad magic, version, or checksum)
    Corrupt(String),

    /// A dataset invariant does not hold (e.g. a student without a placement record)
    InvariantViolation(String),

    /// A placement status string is not one of the fixed enumeration
    UnknownStatus(String),

    /// An insight query name is not in the catalogue
    UnknownQuery(String),
}

impl Error {
    /// Whether this error belongs to the connectivity kind of the taxonomy:
    /// the underlying store is unreachable, incomplete, or unreadable.
    /// Everything else is a query-execution failure.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::MissingTable(_) | Error::Corrupt(_)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Error::MissingTable(name) => write!(f, "Missing table: {}", name),
            Error::Corrupt(msg) => write!(f, "Corrupt table file: {}", msg),
            Error::InvariantViolation(msg) => write!(f, "Invariant violation: {}", msg),
            Error::UnknownStatus(s) => write!(f, "Unknown placement status: {}", s),
            Error::UnknownQuery(name) => write!(f, "Unknown insight query: {}", name),
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

/// A specialized `Result` type for Placelite operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_classification() {
        assert!(Error::MissingTable("students".into()).is_connectivity());
        assert!(Error::Corrupt("bad checksum".into()).is_connectivity());
        assert!(!Error::UnknownStatus("Hired".into()).is_connectivity());
        assert!(!Error::UnknownQuery("nope".into()).is_connectivity());
    }

    #[test]
    fn test_display() {
        let err = Error::UnknownStatus("Hired".into());
        assert_eq!(err.to_string(), "Unknown placement status: Hired");
    }
}
