//! Read-only binary cursor over an immutable buffer.
//!
//! [`ReadOnlyByteStream`] implements the full [`crate::ReadStream`] protocol and never writes to
//! the bytes it borrows. Zero-copy accessors ([`ReadOnlyByteStream::read_span`],
//! [`ReadOnlyByteStream::read_sub_stream_range`], [`ReadOnlyByteStream::content`]) are also
//! offered as inherent methods that return slices tied to the buffer lifetime `'a` rather than
//! to the stream, so parsed views may outlive the cursor that produced them.
//!
//! # Examples
//!
//! ```rust
//! use spanstream::prelude::*;
//!
//! let record = [0x02, 0xCA, 0xFE, 0x2A, 0x00];
//!
//! let name = {
//!     let mut stream = ReadOnlyByteStream::new(&record);
//!     let name = stream.read_sub_stream_range()?;
//!     assert_eq!(stream.read_le::<u16>()?, 42);
//!     name
//! };
//! assert_eq!(name, &[0xCA, 0xFE]);
//! # Ok::<(), spanstream::Error>(())
//! ```

use crate::{
    stream::{frame_bounds, BufferCursor, ReadStream},
    Result,
};

/// A read-only cursor over `&'a [u8]`.
///
/// Several read-only streams may exist over the same buffer at once; none of them can exist
/// while a [`crate::ByteStream`] holds the buffer mutably.
#[derive(Debug, Clone)]
pub struct ReadOnlyByteStream<'a> {
    data: &'a [u8],
    cursor: BufferCursor,
}

impl<'a> ReadOnlyByteStream<'a> {
    /// Create a stream over all of `data`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spanstream::prelude::*;
    ///
    /// let data = [0x01, 0x02, 0x03];
    /// let stream = ReadOnlyByteStream::new(&data);
    /// assert_eq!(stream.len(), 3);
    /// assert_eq!(stream.capacity(), 3);
    /// ```
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        ReadOnlyByteStream {
            data,
            cursor: BufferCursor::full(data.len()),
        }
    }

    /// Create a stream over the first `length` bytes of `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if `length > data.len()`.
    pub fn with_length(data: &'a [u8], length: usize) -> Result<Self> {
        Ok(ReadOnlyByteStream {
            data,
            cursor: BufferCursor::with_length(data.len(), length)?,
        })
    }

    pub(crate) fn from_parts(data: &'a [u8], cursor: BufferCursor) -> Self {
        ReadOnlyByteStream { data, cursor }
    }

    /// Borrows the next `len` bytes for `'a` and advances past them.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if fewer than `len` bytes remain.
    pub fn read_span(&mut self, len: usize) -> Result<&'a [u8]> {
        let range = self.cursor.claim_read(len)?;
        Ok(&self.data[range])
    }

    /// Reads a VLQ length prefix and borrows that many following bytes for `'a`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the declared length exceeds what follows the
    /// prefix, or a VLQ decoding error. The position is unchanged on failure.
    pub fn read_sub_stream_range(&mut self) -> Result<&'a [u8]> {
        let live = &self.data[..self.cursor.len()];
        let payload = frame_bounds(live, self.cursor.position())?;
        let consumed = payload.end - self.cursor.position();
        self.cursor.claim_read(consumed)?;
        Ok(&self.data[payload])
    }

    /// Reads a VLQ length prefix and returns a nested stream over the payload.
    ///
    /// # Errors
    /// See [`ReadOnlyByteStream::read_sub_stream_range`].
    pub fn read_sub_stream(&mut self) -> Result<ReadOnlyByteStream<'a>> {
        self.read_sub_stream_range().map(ReadOnlyByteStream::new)
    }

    /// The unread remainder `[position, length)`, borrowed for `'a`.
    #[must_use]
    pub fn content(&self) -> &'a [u8] {
        &self.data[self.cursor.position()..self.cursor.len()]
    }
}

impl ReadStream for ReadOnlyByteStream<'_> {
    fn cursor(&self) -> &BufferCursor {
        &self.cursor
    }

    fn cursor_mut(&mut self) -> &mut BufferCursor {
        &mut self.cursor
    }

    fn data(&self) -> &[u8] {
        &self.data[..self.cursor.len()]
    }
}

impl<'a> From<&'a [u8]> for ReadOnlyByteStream<'a> {
    fn from(data: &'a [u8]) -> Self {
        ReadOnlyByteStream::new(data)
    }
}
