//! Error types.

use crate::{Length, Tag};
use core::{convert::Infallible, fmt};

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Error {
    /// Kind of error
    kind: ErrorKind,

    /// Position inside of message where error occurred
    position: Option<Length>,
}

impl Error {
    /// Create a new [`Error`]
    pub fn new(kind: ErrorKind, position: Length) -> Error {
        Error {
            kind,
            position: Some(position),
        }
    }

    /// Get the [`ErrorKind`] which occurred.
    pub fn kind(self) -> ErrorKind {
        self.kind
    }

    /// Get the position inside of the message where the error occurred.
    pub fn position(self) -> Option<Length> {
        self.position
    }

    /// For errors occurring inside of a nested message, extend the position
    /// count by the location where the nested message occurs.
    pub fn nested(self, nested_position: Length) -> Self {
        let position = (nested_position + self.position.unwrap_or_default()).ok();

        Self {
            kind: self.kind,
            position,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if let Some(pos) = self.position {
            write!(f, " at BER byte {}", pos)?;
        }

        Ok(())
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            position: None,
        }
    }
}

impl From<core::convert::Infallible> for Error {
    fn from(_: Infallible) -> Error {
        unreachable!()
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ErrorKind {}

/// Error type.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Operation failed due to previous error
    Failed,

    /// Indefinite-length form (`0x80` length octet) is not supported
    IndefiniteLength,

    /// Malformed BIT STRING content
    InvalidBitString,

    /// Invalid BER class octet
    InvalidClass {
        /// Raw class bits
        value: u8,
    },

    /// Length octets exceed the limits this crate supports, or claim more
    /// than 8 following octets
    InvalidLength,

    /// Malformed OBJECT IDENTIFIER content
    InvalidOid,

    /// Malformed GeneralizedTime or UTCTime content
    InvalidTime,

    /// Incorrect content length for a given field
    Length {
        /// Tag of the value being decoded
        tag: Tag,
    },

    /// No CHOICE alternative matched the encountered tag
    NoAlternative {
        /// Tag encountered in the message
        actual: Tag,
    },

    /// Integer overflow occurred (library bug!)
    Overflow,

    /// Destination buffer too small, or message longer than supported
    Overlength,

    /// Undecoded trailing data at end of message
    TrailingData {
        /// Length of the decoded data
        decoded: Length,

        /// Total length of the remaining data left in the buffer
        remaining: Length,
    },

    /// Unexpected end-of-message/nested field when decoding
    Truncated,

    /// Encoded message is shorter than the expected length
    /// (i.e. an `Encodable` impl on a particular type has a buggy `encoded_length`)
    Underlength {
        /// Expected length
        expected: Length,

        /// Actual length
        actual: Length,
    },

    /// Unexpected tag (the constructed bit is part of the comparison)
    UnexpectedTag {
        /// Tag the decoder was expecting (if there is a single such tag).
        ///
        /// `None` if multiple tags are expected/allowed, but the `actual` tag
        /// does not match any of them.
        expected: Option<Tag>,

        /// Actual tag encountered in the message
        actual: Tag,
    },
}

impl ErrorKind {
    /// Annotate an [`ErrorKind`] with context about where it occurred,
    /// returning an error.
    pub fn at(self, position: Length) -> Error {
        Error::new(self, position)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Failed => write!(f, "operation failed"),
            ErrorKind::IndefiniteLength => write!(f, "indefinite length form is not supported"),
            ErrorKind::InvalidBitString => write!(f, "malformed BIT STRING"),
            ErrorKind::InvalidClass { value } => write!(f, "invalid BER class: 0x{:02x}", value),
            ErrorKind::InvalidLength => write!(f, "length octets exceed supported limits"),
            ErrorKind::InvalidOid => write!(f, "malformed OBJECT IDENTIFIER"),
            ErrorKind::InvalidTime => write!(f, "malformed time content"),
            ErrorKind::Length { tag } => write!(f, "incorrect content length for {}", tag),
            ErrorKind::NoAlternative { actual } => {
                write!(f, "no CHOICE alternative matches {}", actual)
            }
            ErrorKind::Overflow => write!(f, "integer overflow"),
            ErrorKind::Overlength => write!(f, "BER message is too long"),
            ErrorKind::TrailingData { decoded, remaining } => {
                write!(
                    f,
                    "trailing data at end of BER message: decoded {} bytes, {} bytes remaining",
                    decoded, remaining
                )
            }
            ErrorKind::Truncated => write!(f, "BER message is truncated"),
            ErrorKind::Underlength { expected, actual } => write!(
                f,
                "BER message too short: expected {}, got {}",
                expected, actual
            ),
            ErrorKind::UnexpectedTag { expected, actual } => {
                write!(f, "unexpected BER tag: ")?;

                if let Some(tag) = expected {
                    write!(f, "expected {}, ", tag)?;
                }

                write!(f, "got {}", actual)
            }
        }
    }
}
