use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_range_error {
    ($position:expr, $requested:expr, $limit:expr) => {
        crate::Error::OutOfRange {
            position: $position,
            requested: $requested,
            limit: $limit,
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every stream operation either succeeds or fails with one of these variants *before* the
/// cursor state is touched, so a caller that receives an error can keep using the stream as
/// if the call had never been made. The only exception are the copy operations against an
/// external [`std::io::Read`] or [`std::io::Write`] collaborator, where bytes that were already
/// transferred stay accounted for.
///
/// # Error Categories
///
/// ## Cursor Errors
/// - [`Error::OutOfRange`] - A position, length or count would leave `0 <= position <= length <= capacity`
/// - [`Error::UnexpectedEndOfStream`] - A read-fully style operation ran out of data
///
/// ## Encoding Errors
/// - [`Error::MalformedVlq`] - A VLQ did not terminate within its byte bound
/// - [`Error::Malformed`] - Content that cannot be decoded (e.g. unpaired UTF-16 surrogates)
/// - [`Error::Cast`] - A reinterpretation between element types is not possible
///
/// ## I/O Errors
/// - [`Error::Io`] - An external sink or source failed or returned a short read
///
/// # Examples
///
/// ```rust
/// use spanstream::{ByteStream, Error, ReadStream, WriteStream};
///
/// let mut buffer = [0u8; 2];
/// let mut stream = ByteStream::new(&mut buffer);
///
/// match stream.write(&[1, 2, 3]) {
///     Err(Error::OutOfRange { requested, limit, .. }) => {
///         assert_eq!(requested, 3);
///         assert_eq!(limit, 2);
///     }
///     other => panic!("unexpected result: {other:?}"),
/// }
/// assert_eq!(stream.position(), 0);
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A requested position, length or element count does not fit into the stream.
    ///
    /// `requested` is the size (or absolute target) asked for, `limit` the bound it was
    /// checked against: the logical length for reads and seeks, the capacity for writes.
    ///
    /// # Fields
    ///
    /// * `position` - The cursor position when the request was made
    /// * `requested` - The number of elements (or the target offset) requested
    /// * `limit` - The bound the request exceeded
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Out of range - {file}:{line}: requested {requested} at position {position}, limit is {limit}")]
    OutOfRange {
        /// The cursor position when the request was made
        position: usize,
        /// The number of elements (or the absolute target) requested
        requested: usize,
        /// The bound which the request exceeded
        limit: usize,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Fewer elements remain than a read-fully style operation requires.
    #[error("Unexpected end of stream - requested {requested}, only {available} available")]
    UnexpectedEndOfStream {
        /// The number of elements that were requested
        requested: usize,
        /// The number of elements that were available
        available: usize,
    },

    /// A VLQ continuation sequence exceeded its byte bound without terminating, or a value
    /// is too large to be encoded within that bound.
    #[error("Malformed VLQ - no terminating byte after {consumed} bytes")]
    MalformedVlq {
        /// How many bytes were consumed (or would be required) before giving up
        consumed: usize,
    },

    /// The content could not be decoded.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A reinterpretation between two element types failed.
    #[error("Cast failed - {0:?}")]
    Cast(bytemuck::PodCastError),

    /// An external sink or source failed.
    ///
    /// Wraps standard I/O errors returned by the [`std::io::Read`] / [`std::io::Write`]
    /// collaborators, and short reads where a positive count was required.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if this is an [`Error::OutOfRange`].
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::OutOfRange { .. })
    }

    /// Returns `true` if this is an [`Error::UnexpectedEndOfStream`].
    #[must_use]
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Error::UnexpectedEndOfStream { .. })
    }

    /// Returns `true` if this is an [`Error::MalformedVlq`].
    #[must_use]
    pub fn is_malformed_vlq(&self) -> bool {
        matches!(self, Error::MalformedVlq { .. })
    }
}

impl From<bytemuck::PodCastError> for Error {
    fn from(error: bytemuck::PodCastError) -> Self {
        Error::Cast(error)
    }
}

impl From<Error> for std::io::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::Io(inner) => inner,
            Error::OutOfRange { .. } => std::io::Error::new(std::io::ErrorKind::WriteZero, error),
            Error::UnexpectedEndOfStream { .. } => {
                std::io::Error::new(std::io::ErrorKind::UnexpectedEof, error)
            }
            _ => std::io::Error::new(std::io::ErrorKind::InvalidData, error),
        }
    }
}
