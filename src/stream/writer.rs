//! Read-write binary cursor over a mutable buffer.
//!
//! [`ByteStream`] borrows `&'a mut [u8]` exclusively for its whole life. It implements the read
//! protocol of [`crate::ReadStream`] and the write protocol of [`crate::WriteStream`]: writes
//! land at the position and grow the logical length when they end beyond it, up to the fixed
//! capacity and never further.
//!
//! The usual life of a stream is *write, flip, read*:
//!
//! ```rust
//! use spanstream::prelude::*;
//!
//! let mut buffer = [0u8; 32];
//! let mut stream = ByteStream::new(&mut buffer);
//!
//! stream.write(&[0x01, 0x02, 0x03])?;
//! stream.write_vlq(300)?;
//! assert_eq!(stream.len(), 5);
//!
//! stream.flip();
//! let mut head = [0u8; 3];
//! stream.read_fully(&mut head)?;
//! assert_eq!(head, [0x01, 0x02, 0x03]);
//! assert_eq!(stream.read_vlq()?, 300);
//! # Ok::<(), spanstream::Error>(())
//! ```

use crate::{
    stream::{BufferCursor, ReadOnlyByteStream, ReadStream, WriteStream},
    Result,
};

/// A read-write cursor over `&'a mut [u8]`.
#[derive(Debug)]
pub struct ByteStream<'a> {
    buffer: &'a mut [u8],
    cursor: BufferCursor,
}

impl<'a> ByteStream<'a> {
    /// Create an empty stream (`length == 0`) over `buffer`, ready to be written.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spanstream::prelude::*;
    ///
    /// let mut buffer = [0u8; 8];
    /// let stream = ByteStream::new(&mut buffer);
    /// assert_eq!(stream.len(), 0);
    /// assert_eq!(stream.capacity(), 8);
    /// ```
    #[must_use]
    pub fn new(buffer: &'a mut [u8]) -> Self {
        let cursor = BufferCursor::new(buffer.len());
        ByteStream { buffer, cursor }
    }

    /// Create a stream over a buffer whose first `length` bytes are already populated.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if `length > buffer.len()`.
    pub fn with_length(buffer: &'a mut [u8], length: usize) -> Result<Self> {
        let cursor = BufferCursor::with_length(buffer.len(), length)?;
        Ok(ByteStream { buffer, cursor })
    }

    /// Create a stream over a fully populated buffer (`length == capacity`).
    #[must_use]
    pub fn full(buffer: &'a mut [u8]) -> Self {
        let cursor = BufferCursor::full(buffer.len());
        ByteStream { buffer, cursor }
    }

    /// A read-only view sharing this stream's position and length.
    ///
    /// The view has its own cursor; reading through it does not move this stream.
    #[must_use]
    pub fn as_read_only(&self) -> ReadOnlyByteStream<'_> {
        ReadOnlyByteStream::from_parts(&self.buffer[..], self.cursor.clone())
    }

    /// Gives up write access, keeping the borrow of the buffer for `'a`.
    #[must_use]
    pub fn into_read_only(self) -> ReadOnlyByteStream<'a> {
        let ByteStream { buffer, cursor } = self;
        ReadOnlyByteStream::from_parts(buffer, cursor)
    }

    /// Resets to an empty stream over the same buffer. The bytes are left as they are.
    pub fn clear(&mut self) {
        self.cursor.clear();
    }
}

impl ReadStream for ByteStream<'_> {
    fn cursor(&self) -> &BufferCursor {
        &self.cursor
    }

    fn cursor_mut(&mut self) -> &mut BufferCursor {
        &mut self.cursor
    }

    fn data(&self) -> &[u8] {
        &self.buffer[..self.cursor.len()]
    }
}

impl WriteStream for ByteStream<'_> {
    fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer[..]
    }
}

impl<'a> From<&'a mut [u8]> for ByteStream<'a> {
    fn from(buffer: &'a mut [u8]) -> Self {
        ByteStream::new(buffer)
    }
}
