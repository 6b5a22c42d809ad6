//! Error types for the memory cursors

/// Errors that can occur while writing to or reading from a cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Allocation of cursor storage failed
    OutOfMemory,
    /// Integer overflow in capacity calculations
    Overflow,
    /// Fixed external region too small for the write
    ShortBuffer,
    /// Not enough unread bytes for an all-or-nothing read
    UnexpectedEof,
}

impl Error {
    /// Returns a human-readable description of the error
    pub const fn description(&self) -> &'static str {
        match self {
            Error::OutOfMemory => "out of memory while allocating cursor storage",
            Error::Overflow => "integer overflow in capacity calculations",
            Error::ShortBuffer => "external buffer too small for write",
            Error::UnexpectedEof => "unexpected end of input",
        }
    }
}

#[cfg(feature = "std")]
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        let kind = match err {
            Error::OutOfMemory => std::io::ErrorKind::OutOfMemory,
            Error::ShortBuffer => std::io::ErrorKind::WriteZero,
            Error::UnexpectedEof => std::io::ErrorKind::UnexpectedEof,
            Error::Overflow => std::io::ErrorKind::InvalidInput,
        };
        std::io::Error::new(kind, err)
    }
}

/// Result type alias for cursor operations
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn test_display_matches_description() {
        assert_eq!(Error::OutOfMemory.to_string(), Error::OutOfMemory.description());
        assert_eq!(Error::ShortBuffer.to_string(), "external buffer too small for write");
    }

    #[test]
    fn test_io_error_kinds() {
        let err: std::io::Error = Error::OutOfMemory.into();
        assert_eq!(err.kind(), std::io::ErrorKind::OutOfMemory);

        let err: std::io::Error = Error::ShortBuffer.into();
        assert_eq!(err.kind(), std::io::ErrorKind::WriteZero);

        let err: std::io::Error = Error::UnexpectedEof.into();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    }
}
