//! Error types for TCD codec operations.
//!
//! This module defines the [`Error`] enum which represents all possible failures
//! that can occur when decoding, encoding, or manipulating TCD datasets.
//!
//! # Example
//!
//! ```no_run
//! use tcd_rs::{Dataset, Error, Result};
//!
//! fn load(path: &str) -> Result<()> {
//!     match Dataset::from_file(path) {
//!         Ok(dataset) => {
//!             println!("Loaded {} tallies", dataset.tallies.len());
//!             Ok(())
//!         }
//!         Err(Error::Decode { line, source, cause }) => {
//!             eprintln!("Decode failed at line {line}: {cause}");
//!             Err(Error::Decode { line, source, cause })
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use core::fmt;

/// Errors that can occur during TCD codec operations.
///
/// This enum covers all failure modes including I/O errors, value parsing
/// failures, and structural violations of the interchange format.
#[derive(Debug)]
pub enum Error {
    /// An I/O error occurred while reading or writing a file.
    IOError(std::io::Error),

    /// A line started with a record code not present in the header catalog.
    ///
    /// The record set of the format is fixed; encountering an unlisted code
    /// indicates a corrupt or foreign file.
    UnknownRecordCode {
        /// The code that was found
        code: String,
    },

    /// A header line appeared after one or more body records.
    ///
    /// All header lines must precede all body lines; the field layout of body
    /// records is frozen once the first body record has been decoded.
    HeaderAfterBody {
        /// Code of the offending header record
        code: String,
    },

    /// A singleton header record appeared more than once.
    DuplicateRecord {
        /// Code of the repeated record
        code: String,
    },

    /// A record payload did not have the shape its kind requires.
    MalformedRecord {
        /// Code or name of the record kind being decoded
        record: &'static str,
        /// Human-readable description of the violation
        reason: String,
    },

    /// A field that must be numeric could not be parsed.
    ValueParse {
        /// Name of the field being parsed
        field: &'static str,
        /// The raw text that failed to parse
        value: String,
    },

    /// A classification count array disagreed with the header-declared bin
    /// count while strict decoding was requested for that dimension.
    BinCountMismatch {
        /// Which classification dimension mismatched
        classification: &'static str,
        /// Bin count declared by the header
        expected: usize,
        /// Number of values actually present
        actual: usize,
    },

    /// A body record referenced a channel the header never declared.
    UnknownChannel {
        /// The undeclared logical channel ID
        channel: u16,
    },

    /// A renumbering operation targeted a channel ID that is already in use.
    ChannelIdTaken {
        /// The logical channel ID that already exists
        channel: u16,
    },

    /// A dataset index could not be serialized or deserialized.
    ///
    /// Only available with the `serde` feature.
    #[cfg(feature = "serde")]
    IndexSerialization(String),

    /// A failure wrapped with the 1-based input line it occurred at and, when
    /// decoding from a named source, the source identifier.
    Decode {
        /// 1-based line number within the input
        line: usize,
        /// Identifier of the input (file name), if known
        source: Option<String>,
        /// The underlying failure
        cause: Box<Error>,
    },
}

impl Error {
    /// Wrap any error with decode position context.
    ///
    /// Already-wrapped errors are returned unchanged so the innermost (first)
    /// position wins.
    pub(crate) fn at_line(self, line: usize, source: Option<&str>) -> Error {
        match self {
            Error::Decode { .. } => self,
            other => Error::Decode {
                line,
                source: source.map(String::from),
                cause: Box::new(other),
            },
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IOError(e) => write!(f, "I/O error: {e}"),
            Error::UnknownRecordCode { code } => {
                write!(f, "Unknown record code {code:?}")
            }
            Error::HeaderAfterBody { code } => {
                write!(
                    f,
                    "Header record {code:?} after first body record: all header lines must precede the body"
                )
            }
            Error::DuplicateRecord { code } => {
                write!(f, "Header record {code:?} may only appear once")
            }
            Error::MalformedRecord { record, reason } => {
                write!(f, "Malformed {record} record: {reason}")
            }
            Error::ValueParse { field, value } => {
                write!(f, "Cannot parse {field} from {value:?}")
            }
            Error::BinCountMismatch {
                classification,
                expected,
                actual,
            } => write!(
                f,
                "{classification} segment has {actual} values, header declares {expected} bins"
            ),
            Error::UnknownChannel { channel } => {
                write!(f, "Channel {channel} is not declared in the header")
            }
            Error::ChannelIdTaken { channel } => {
                write!(f, "Channel ID {channel} is already declared")
            }
            #[cfg(feature = "serde")]
            Error::IndexSerialization(reason) => {
                write!(f, "Index serialization error: {reason}")
            }
            Error::Decode {
                line,
                source,
                cause,
            } => match source {
                Some(name) => write!(f, "{name}, line {line}: {cause}"),
                None => write!(f, "line {line}: {cause}"),
            },
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IOError(e) => Some(e),
            Error::Decode { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IOError(err)
    }
}

/// A specialized Result type for TCD operations.
///
/// This is defined as `std::result::Result<T, Error>` for convenience.
pub type Result<T> = std::result::Result<T, Error>;
