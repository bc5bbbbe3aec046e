//! A module to handle all errors

#[cfg(feature = "std")]
use std::io;

/// A wrapper for `Result<T, Error>`
pub type Result<T> = ::core::result::Result<T, Error>;

/// An error enum
#[derive(Debug)]
pub enum Error {
    /// Io error
    #[cfg(feature = "std")]
    Io(io::Error),
    /// Utf8 Error
    Utf8(::core::str::Utf8Error),
    /// A fixed-length string was packed with a value of the wrong byte length
    LengthMismatch {
        /// Index of the offending field
        field: usize,
        /// Declared length
        expected: usize,
        /// Byte length of the value
        found: usize,
    },
    /// Not enough bytes left in the buffer to unpack a field
    BufferUnderrun {
        /// Index of the offending field
        field: usize,
        /// Bytes the field needs
        needed: usize,
        /// Bytes left in the buffer
        available: usize,
    },
    /// A packed value does not match the kind of its field
    TypeMismatch {
        /// Index of the offending field
        field: usize,
        /// Kind declared by the format
        expected: &'static str,
        /// Kind of the value
        found: &'static str,
    },
    /// Number of values does not match the number of fields
    ArityMismatch {
        /// Number of values required
        expected: usize,
        /// Number of values supplied
        found: usize,
    },
    /// A string is too long for its length prefix
    LengthOverflow {
        /// Index of the offending field
        field: usize,
        /// Byte length of the value
        length: usize,
        /// Largest length the prefix can carry
        max: u64,
    },
    /// A NUL-padded string value ends in a NUL byte
    TrailingNul {
        /// Index of the offending field
        field: usize,
    },
    /// A view was decoded as a field it was not cut for
    ViewMismatch {
        /// Field asked to decode
        expected: &'static str,
        /// Field the view belongs to
        found: &'static str,
    },
    /// The format was rejected at build time
    InvalidFormat(&'static str),
    /// Out of space when writing into a fixed slice
    UnexpectedEndOfBuffer,
}

#[cfg(feature = "std")]
impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<::core::str::Utf8Error> for Error {
    fn from(e: ::core::str::Utf8Error) -> Error {
        Error::Utf8(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Utf8(e) => Some(e),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            #[cfg(feature = "std")]
            Error::Io(e) => write!(f, "{}", e),
            Error::Utf8(e) => write!(f, "{}", e),
            Error::LengthMismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "field {}: packed string should be of length {}, got {}",
                field, expected, found
            ),
            Error::BufferUnderrun {
                field,
                needed,
                available,
            } => write!(
                f,
                "field {}: not enough data left in buffer, needed {} bytes, only {} available",
                field, needed, available
            ),
            Error::TypeMismatch {
                field,
                expected,
                found,
            } => write!(f, "field {}: expected {} value, got {}", field, expected, found),
            Error::ArityMismatch { expected, found } => {
                write!(f, "expected {} values, got {}", expected, found)
            }
            Error::LengthOverflow { field, length, max } => write!(
                f,
                "field {}: string length {} does not fit length prefix (max {})",
                field, length, max
            ),
            Error::TrailingNul { field } => write!(
                f,
                "field {}: NUL padded string should not end with a NUL byte",
                field
            ),
            Error::ViewMismatch { expected, found } => {
                write!(f, "cannot decode a {} view as {}", found, expected)
            }
            Error::InvalidFormat(msg) => write!(f, "invalid format: {}", msg),
            Error::UnexpectedEndOfBuffer => write!(f, "Unexpected end of buffer"),
        }
    }
}
