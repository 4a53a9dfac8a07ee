//! Bounds-checked binary streams over caller-owned buffers.
//!
//! This module provides two cursor types with the same read protocol at different capability
//! levels, plus the VLQ codec used to frame nested records inside them.
//!
//! # Architecture
//!
//! - [`BufferCursor`] tracks `position`, `length` and `capacity` and owns all bounds checks.
//! - [`ReadStream`] implements the complete read protocol once, on top of three accessors.
//! - [`WriteStream`] adds the write protocol on top of [`ReadStream`].
//! - [`ReadOnlyByteStream`] borrows `&'a [u8]` and implements [`ReadStream`].
//! - [`ByteStream`] borrows `&'a mut [u8]` and implements both traits.
//!
//! Neither stream owns or resizes memory: the capacity is `buffer.len()` at construction and
//! every operation that would go beyond it fails instead. Failed operations leave the cursor
//! untouched.
//!
//! # Examples
//!
//! ```rust
//! use spanstream::prelude::*;
//!
//! let mut buffer = [0u8; 16];
//! let mut writer = ByteStream::new(&mut buffer);
//! writer.write_sub_stream(b"hello")?;
//! writer.write_le(7_u32)?;
//! writer.flip();
//!
//! let mut reader = writer.into_read_only();
//! assert_eq!(reader.read_sub_stream_range()?, b"hello");
//! assert_eq!(reader.read_le::<u32>()?, 7);
//! assert!(!reader.has_remaining());
//! # Ok::<(), spanstream::Error>(())
//! ```

pub mod cursor;
pub mod io;
pub mod reader;
pub mod vlq;
pub mod writer;

use std::{
    io::{ErrorKind, Read, Seek, SeekFrom, Write},
    ops::Range,
};

use bytemuck::{AnyBitPattern, NoUninit, Pod};
use strum::{Display, EnumIter};

pub use cursor::BufferCursor;
pub use io::ByteOrderIO;
pub use reader::ReadOnlyByteStream;
pub use writer::ByteStream;

use crate::{Error, Result};

/// Chunk size used by [`WriteStream::copy_from`] when pulling from an external source.
pub const DEFAULT_COPY_CHUNK: usize = 81_920;

/// Reference point for [`ReadStream::seek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum SeekOrigin {
    /// Relative to the start of the stream.
    Begin,
    /// Relative to the current position.
    Current,
    /// Relative to the logical length.
    End,
}

/// Locates a VLQ length-prefixed frame that starts at `position` in `data`.
///
/// Returns the payload range. Nothing is consumed; callers commit the advance once they are
/// done with the payload.
pub(crate) fn frame_bounds(data: &[u8], position: usize) -> Result<Range<usize>> {
    let (declared, prefix) = vlq::decode_slice(&data[position..])?;

    let start = position + prefix;
    let available = data.len() - start;
    let Some(length) = usize::try_from(declared)
        .ok()
        .filter(|length| *length <= available)
    else {
        log::trace!("sub-stream at {position} declares {declared} bytes, {available} available");
        return Err(out_of_range_error!(
            position,
            usize::try_from(declared).unwrap_or(usize::MAX),
            available
        ));
    };

    Ok(start..start + length)
}

/// The read protocol shared by [`ReadOnlyByteStream`] and [`ByteStream`].
///
/// Implementors only expose their cursor and their live bytes; every operation is provided
/// here, so both stream types behave identically by construction.
///
/// # Examples
///
/// ```rust
/// use spanstream::prelude::*;
///
/// fn checksum<S: ReadStream>(stream: &mut S) -> u32 {
///     let mut sum = 0_u32;
///     while let Some(byte) = stream.read_byte() {
///         sum = sum.wrapping_add(u32::from(byte));
///     }
///     sum
/// }
///
/// let data = [1, 2, 3];
/// assert_eq!(checksum(&mut ReadOnlyByteStream::new(&data)), 6);
/// ```
pub trait ReadStream {
    /// The cursor of this stream.
    fn cursor(&self) -> &BufferCursor;

    /// The cursor of this stream, mutably.
    fn cursor_mut(&mut self) -> &mut BufferCursor;

    /// The live content `[0, length)`, independent of the position.
    fn data(&self) -> &[u8];

    /// The next byte to be accessed.
    fn position(&self) -> usize {
        self.cursor().position()
    }

    /// The logical length.
    fn len(&self) -> usize {
        self.cursor().len()
    }

    /// Returns `true` if the logical length is zero.
    fn is_empty(&self) -> bool {
        self.cursor().is_empty()
    }

    /// The fixed size of the backing buffer.
    fn capacity(&self) -> usize {
        self.cursor().capacity()
    }

    /// Bytes left to read: `length - position`.
    fn remaining(&self) -> usize {
        self.cursor().remaining()
    }

    /// Returns `true` if at least one byte is left to read.
    fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    /// The unread remainder `[position, length)`.
    fn content(&self) -> &[u8] {
        &self.data()[self.position()..]
    }

    /// Copies up to `buf.len()` bytes into `buf`.
    ///
    /// Returns `None` if the stream has no data left, otherwise the number of bytes copied.
    fn read(&mut self, buf: &mut [u8]) -> Option<usize> {
        if !self.has_remaining() {
            return None;
        }

        let count = buf.len().min(self.remaining());
        let range = self.cursor_mut().claim_read(count).ok()?;
        buf[..count].copy_from_slice(&self.data()[range]);
        Some(count)
    }

    /// Fills `buf` completely.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnexpectedEndOfStream`] if fewer than `buf.len()` bytes remain; the
    /// position is not advanced in that case.
    fn read_fully(&mut self, buf: &mut [u8]) -> Result<()> {
        let available = self.remaining();
        if buf.len() > available {
            return Err(Error::UnexpectedEndOfStream {
                requested: buf.len(),
                available,
            });
        }

        let range = self.cursor_mut().claim_read(buf.len())?;
        buf.copy_from_slice(&self.data()[range]);
        Ok(())
    }

    /// Reads one byte, or `None` at the end of the stream.
    fn read_byte(&mut self) -> Option<u8> {
        let range = self.cursor_mut().claim_read(1).ok()?;
        Some(self.data()[range.start])
    }

    /// Returns the next byte without advancing.
    fn peek_byte(&self) -> Option<u8> {
        self.content().first().copied()
    }

    /// Borrows the next `len` bytes without copying and advances past them.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if fewer than `len` bytes remain.
    fn read_span(&mut self, len: usize) -> Result<&[u8]> {
        let range = self.cursor_mut().claim_read(len)?;
        Ok(&self.data()[range])
    }

    /// Copies the next `size_of::<T>()` bytes out as a `T`.
    ///
    /// The bytes need not be aligned for `T`; they are copied byte by byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if fewer than `size_of::<T>()` bytes remain.
    fn read_value<T: AnyBitPattern>(&mut self) -> Result<T>
    where
        Self: Sized,
    {
        let range = self.cursor_mut().claim_read(std::mem::size_of::<T>())?;
        Ok(bytemuck::pod_read_unaligned(&self.data()[range]))
    }

    /// Like [`ReadStream::read_value`] but does not advance.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if fewer than `size_of::<T>()` bytes remain.
    fn peek_value<T: AnyBitPattern>(&self) -> Result<T>
    where
        Self: Sized,
    {
        let size = std::mem::size_of::<T>();
        self.cursor().ensure_remaining(size)?;
        Ok(bytemuck::pod_read_unaligned(&self.content()[..size]))
    }

    /// Copies the next `count` values of `T` out into a new vector.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if `count * size_of::<T>()` overflows or exceeds the
    /// remainder.
    fn read_range<T: AnyBitPattern>(&mut self, count: usize) -> Result<Vec<T>>
    where
        Self: Sized,
    {
        let size = std::mem::size_of::<T>();
        let total = count
            .checked_mul(size)
            .ok_or_else(|| out_of_range_error!(self.position(), usize::MAX, self.remaining()))?;

        let range = self.cursor_mut().claim_read(total)?;
        if size == 0 {
            return Ok(vec![T::zeroed(); count]);
        }

        Ok(self.data()[range]
            .chunks_exact(size)
            .map(bytemuck::pod_read_unaligned)
            .collect())
    }

    /// Fills `out` with the next `out.len()` values of `T` without allocating.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if not enough bytes remain.
    fn read_range_into<T: Pod>(&mut self, out: &mut [T]) -> Result<()>
    where
        Self: Sized,
    {
        let target: &mut [u8] = bytemuck::cast_slice_mut(out);
        let range = self.cursor_mut().claim_read(target.len())?;
        target.copy_from_slice(&self.data()[range]);
        Ok(())
    }

    /// Reads a little-endian primitive.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if fewer than `size_of::<T>()` bytes remain.
    fn read_le<T: ByteOrderIO>(&mut self) -> Result<T>
    where
        Self: Sized,
    {
        let range = self.cursor_mut().claim_read(std::mem::size_of::<T>())?;
        io::decode_le(&self.data()[range.clone()])
            .ok_or_else(|| out_of_range_error!(range.start, range.len(), range.len()))
    }

    /// Reads a big-endian primitive.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if fewer than `size_of::<T>()` bytes remain.
    fn read_be<T: ByteOrderIO>(&mut self) -> Result<T>
    where
        Self: Sized,
    {
        let range = self.cursor_mut().claim_read(std::mem::size_of::<T>())?;
        io::decode_be(&self.data()[range.clone()])
            .ok_or_else(|| out_of_range_error!(range.start, range.len(), range.len()))
    }

    /// Repositions the stream and returns the new position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the target lies outside `[0, length]`; the
    /// position is unchanged in that case.
    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<usize> {
        self.cursor_mut().seek(offset, origin)
    }

    /// Moves to an absolute position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if `position > length`.
    fn set_position(&mut self, position: usize) -> Result<()> {
        self.cursor_mut().set_position(position)
    }

    /// Advances by `len` bytes without copying.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if fewer than `len` bytes remain.
    fn skip(&mut self, len: usize) -> Result<()> {
        self.cursor_mut().claim_read(len).map(|_| ())
    }

    /// Advances to the next multiple of `alignment`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `alignment` is not a power of two, or
    /// [`crate::Error::OutOfRange`] if the aligned position lies beyond the length.
    fn align(&mut self, alignment: usize) -> Result<()> {
        if !alignment.is_power_of_two() {
            return Err(malformed_error!(
                "Alignment must be a power of two - {}",
                alignment
            ));
        }

        let padding = (alignment - (self.position() % alignment)) % alignment;
        self.skip(padding)
    }

    /// Runs `f` and restores the position if it fails.
    ///
    /// # Errors
    /// Returns whatever `f` returns.
    fn transactional<T, F>(&mut self, f: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let saved = self.position();
        let result = f(self);
        if result.is_err() {
            self.cursor_mut().restore_position(saved);
        }
        result
    }

    /// Decodes one VLQ (see [`vlq`]).
    ///
    /// # Errors
    /// Returns [`crate::Error::UnexpectedEndOfStream`] or [`crate::Error::MalformedVlq`]; the
    /// position is unchanged on failure.
    fn read_vlq(&mut self) -> Result<u64> {
        let (value, consumed) = vlq::decode_slice(self.content())?;
        self.cursor_mut().claim_read(consumed)?;
        Ok(value)
    }

    /// Reads a VLQ length prefix and borrows that many following bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the declared length exceeds what follows the
    /// prefix, or a VLQ decoding error. The position is unchanged on failure.
    fn read_sub_stream_range(&mut self) -> Result<&[u8]> {
        let payload = frame_bounds(self.data(), self.position())?;
        let consumed = payload.end - self.position();
        self.cursor_mut().claim_read(consumed)?;
        Ok(&self.data()[payload])
    }

    /// Reads a VLQ length prefix and writes that many following bytes to `sink`.
    ///
    /// Returns the payload length. The position only advances once the sink accepted the whole
    /// payload.
    ///
    /// # Errors
    /// As [`ReadStream::read_sub_stream_range`], plus [`crate::Error::Io`] if the sink fails.
    fn read_sub_stream_into<W: Write + ?Sized>(&mut self, sink: &mut W) -> Result<usize>
    where
        Self: Sized,
    {
        let payload = frame_bounds(self.data(), self.position())?;
        sink.write_all(&self.data()[payload.clone()])?;
        let consumed = payload.end - self.position();
        self.cursor_mut().claim_read(consumed)?;
        Ok(payload.len())
    }

    /// Writes the whole remainder to `sink` in a single call.
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the sink fails.
    fn copy_to<W: Write + ?Sized>(&mut self, sink: &mut W) -> Result<usize>
    where
        Self: Sized,
    {
        let chunk_size = self.remaining().max(1);
        self.copy_to_chunked(sink, chunk_size)
    }

    /// Writes the remainder to `sink` in chunks of at most `chunk_size` bytes.
    ///
    /// The position advances after each chunk the sink accepted, so after a sink failure it
    /// reflects exactly what was delivered.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if `chunk_size` is zero, or [`crate::Error::Io`] if
    /// the sink fails.
    fn copy_to_chunked<W: Write + ?Sized>(
        &mut self,
        sink: &mut W,
        chunk_size: usize,
    ) -> Result<usize>
    where
        Self: Sized,
    {
        if chunk_size == 0 {
            return Err(out_of_range_error!(self.position(), 0, self.remaining()));
        }

        let mut total = 0;
        while self.has_remaining() {
            let count = chunk_size.min(self.remaining());
            sink.write_all(&self.content()[..count])?;
            self.cursor_mut().claim_read(count)?;
            total += count;
        }

        log::trace!("copied {total} bytes to sink in chunks of {chunk_size}");
        Ok(total)
    }
}

/// The write protocol of [`ByteStream`].
///
/// Writes land at the position, advance it, and grow the logical length when they end beyond
/// it. Nothing ever grows past the capacity.
pub trait WriteStream: ReadStream {
    /// The whole backing buffer `[0, capacity)`, mutably.
    fn buffer_mut(&mut self) -> &mut [u8];

    /// Copies `bytes` in at the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the write would end beyond the capacity. Nothing
    /// is written in that case.
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let range = self.cursor_mut().claim_write(bytes.len())?;
        self.buffer_mut()[range].copy_from_slice(bytes);
        Ok(())
    }

    /// Writes one byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the stream is at capacity.
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        let range = self.cursor_mut().claim_write(1)?;
        self.buffer_mut()[range.start] = byte;
        Ok(())
    }

    /// Copies the bytes of `value` in verbatim (native byte order).
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the write would end beyond the capacity.
    fn write_value<T: NoUninit>(&mut self, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        self.write(bytemuck::bytes_of(value))
    }

    /// Copies the bytes of `values` in verbatim (native byte order).
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the write would end beyond the capacity.
    fn write_range<T: NoUninit>(&mut self, values: &[T]) -> Result<()>
    where
        Self: Sized,
    {
        self.write(bytemuck::cast_slice(values))
    }

    /// Writes a little-endian primitive.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the write would end beyond the capacity.
    fn write_le<T: ByteOrderIO>(&mut self, value: T) -> Result<()>
    where
        Self: Sized,
    {
        self.write(value.to_le_bytes().as_ref())
    }

    /// Writes a big-endian primitive.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the write would end beyond the capacity.
    fn write_be<T: ByteOrderIO>(&mut self, value: T) -> Result<()>
    where
        Self: Sized,
    {
        self.write(value.to_be_bytes().as_ref())
    }

    /// Claims the next `len` bytes for the caller to fill in place and advances past them.
    ///
    /// The span is bounded by the capacity and grows the logical length exactly like
    /// [`WriteStream::write`]. It holds whatever the buffer contained before.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the span would end beyond the capacity.
    fn prepare_write_span(&mut self, len: usize) -> Result<&mut [u8]> {
        let range = self.cursor_mut().claim_write(len)?;
        Ok(&mut self.buffer_mut()[range])
    }

    /// Writes `len` zero bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the write would end beyond the capacity.
    fn write_zero_range(&mut self, len: usize) -> Result<()> {
        let range = self.cursor_mut().claim_write(len)?;
        self.buffer_mut()[range].fill(0);
        Ok(())
    }

    /// Zeroes `[position, length)` and moves the position to the length. Never grows.
    fn fill_with_zeroes(&mut self) {
        let range = self.cursor_mut().claim_rest();
        self.buffer_mut()[range].fill(0);
    }

    /// Encodes `value` as a VLQ and returns how many bytes it took.
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedVlq`] for values above [`vlq::MAX_VLQ_VALUE`], or
    /// [`crate::Error::OutOfRange`] if the encoding does not fit.
    fn write_vlq(&mut self, value: u64) -> Result<usize> {
        let mut scratch = [0u8; vlq::MAX_VLQ_BYTES];
        let encoded = vlq::encode(value, &mut scratch)?;
        self.write(encoded)?;
        Ok(encoded.len())
    }

    /// Writes `payload` as a VLQ length-prefixed sub-stream.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if prefix and payload do not fit together; nothing
    /// is written in that case.
    fn write_sub_stream(&mut self, payload: &[u8]) -> Result<()> {
        let mut scratch = [0u8; vlq::MAX_VLQ_BYTES];
        let prefix = vlq::encode(payload.len() as u64, &mut scratch)?;

        let total = prefix.len().checked_add(payload.len()).ok_or_else(|| {
            out_of_range_error!(self.position(), usize::MAX, self.cursor().spare())
        })?;
        let range = self.cursor_mut().claim_write(total)?;

        let (head, tail) = self.buffer_mut()[range].split_at_mut(prefix.len());
        head.copy_from_slice(prefix);
        tail.copy_from_slice(payload);
        Ok(())
    }

    /// Pulls everything `source` has left into the stream, in chunks of
    /// [`DEFAULT_COPY_CHUNK`] bytes.
    ///
    /// # Errors
    /// See [`WriteStream::copy_from_chunked`].
    fn copy_from<R: Read + Seek + ?Sized>(&mut self, source: &mut R) -> Result<usize>
    where
        Self: Sized,
    {
        self.copy_from_chunked(source, DEFAULT_COPY_CHUNK)
    }

    /// Pulls everything `source` has left into the stream, in chunks of at most `max_chunk`
    /// bytes.
    ///
    /// The size left in `source` is measured with [`Seek`] first (the source position is
    /// restored afterwards) and rejected up front if it does not fit into the spare capacity.
    /// The logical length grows as bytes arrive.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the source does not fit or `max_chunk` is zero,
    /// and [`crate::Error::Io`] if the source fails or ends early. Bytes received before an I/O
    /// failure remain written.
    fn copy_from_chunked<R: Read + Seek + ?Sized>(
        &mut self,
        source: &mut R,
        max_chunk: usize,
    ) -> Result<usize>
    where
        Self: Sized,
    {
        if max_chunk == 0 {
            return Err(out_of_range_error!(self.position(), 0, self.cursor().spare()));
        }

        let current = source.stream_position()?;
        let end = source.seek(SeekFrom::End(0))?;
        source.seek(SeekFrom::Start(current))?;

        let declared = end.saturating_sub(current);
        let spare = self.cursor().spare();
        let Some(declared) = usize::try_from(declared).ok().filter(|d| *d <= spare) else {
            return Err(out_of_range_error!(
                self.position(),
                usize::try_from(declared).unwrap_or(usize::MAX),
                spare
            ));
        };

        pull(self, source, declared, max_chunk)?;
        log::trace!("copied {declared} bytes from source in chunks of {max_chunk}");
        Ok(declared)
    }

    /// Pulls exactly `len` bytes from `source`, tolerating short reads.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] up front if `len` exceeds the spare capacity, and
    /// [`crate::Error::Io`] if the source returns zero bytes (or more than asked for) before
    /// `len` bytes arrived. The cursor accounts for every byte received.
    fn read_from<R: Read + ?Sized>(&mut self, source: &mut R, len: usize) -> Result<()>
    where
        Self: Sized,
    {
        let spare = self.cursor().spare();
        if len > spare {
            return Err(out_of_range_error!(self.position(), len, spare));
        }

        pull(self, source, len, len.max(1))
    }

    /// Sets the logical length; a position beyond it is clamped down.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if `length` exceeds the capacity.
    fn set_length(&mut self, length: usize) -> Result<()> {
        self.cursor_mut().set_length(length)
    }

    /// Turns what was written so far into the readable content: `length = position`, then
    /// `position = 0`.
    fn flip(&mut self) {
        self.cursor_mut().flip();
    }
}

/// Reads `len` bytes from `source` into `stream` at its position, `max_chunk` at a time.
fn pull<S, R>(stream: &mut S, source: &mut R, len: usize, max_chunk: usize) -> Result<()>
where
    S: WriteStream + ?Sized,
    R: Read + ?Sized,
{
    let mut received = 0;
    while received < len {
        let wanted = max_chunk.min(len - received);
        let start = stream.position();

        let count = match source.read(&mut stream.buffer_mut()[start..start + wanted]) {
            Ok(0) => {
                log::debug!("source ended after {received} of {len} bytes");
                return Err(std::io::Error::new(
                    ErrorKind::UnexpectedEof,
                    format!("source ended after {received} of {len} bytes"),
                )
                .into());
            }
            Ok(count) if count > wanted => {
                return Err(std::io::Error::new(
                    ErrorKind::InvalidData,
                    format!("source reported {count} bytes for a {wanted} byte read"),
                )
                .into());
            }
            Ok(count) => count,
            Err(error) if error.kind() == ErrorKind::Interrupted => continue,
            Err(error) => return Err(error.into()),
        };

        stream.cursor_mut().claim_write(count)?;
        received += count;
    }

    Ok(())
}
