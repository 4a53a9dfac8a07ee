//! The position/length/capacity triple shared by every stream.
//!
//! [`BufferCursor`] owns no memory. It only tracks which part of a caller supplied region is
//! live and where the next access happens, and it is the single place where the invariant
//!
//! ```text
//! 0 <= position <= length <= capacity
//! ```
//!
//! is checked. Every mutating method either returns the byte range the caller may touch and
//! commits the new state, or fails with [`crate::Error::OutOfRange`] and leaves the triple
//! exactly as it was.
//!
//! Streams embed a cursor next to their borrowed buffer and index the buffer with the ranges
//! returned here, so no stream re-derives the bounds logic on its own.

use std::ops::Range;

use crate::{stream::SeekOrigin, Result};

/// Cursor state over a fixed-capacity region.
///
/// # Examples
///
/// ```rust
/// use spanstream::stream::BufferCursor;
///
/// let mut cursor = BufferCursor::new(8);
/// assert_eq!(cursor.claim_write(3)?, 0..3);
/// assert_eq!(cursor.len(), 3);
///
/// cursor.flip();
/// assert_eq!(cursor.position(), 0);
/// assert_eq!(cursor.claim_read(2)?, 0..2);
/// assert_eq!(cursor.remaining(), 1);
/// # Ok::<(), spanstream::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferCursor {
    position: usize,
    length: usize,
    capacity: usize,
}

impl BufferCursor {
    /// Create an empty cursor (`length == 0`) over a region of `capacity` elements.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        BufferCursor {
            position: 0,
            length: 0,
            capacity,
        }
    }

    /// Create a cursor over a fully populated region (`length == capacity`).
    #[must_use]
    pub fn full(capacity: usize) -> Self {
        BufferCursor {
            position: 0,
            length: capacity,
            capacity,
        }
    }

    /// Create a cursor over a region of `capacity` elements of which the first `length` are live.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if `length > capacity`.
    pub fn with_length(capacity: usize, length: usize) -> Result<Self> {
        if length > capacity {
            return Err(reject(out_of_range_error!(0, length, capacity)));
        }

        Ok(BufferCursor {
            position: 0,
            length,
            capacity,
        })
    }

    /// The next element to be accessed.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if no element is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The fixed size of the backing region.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Elements left to read: `length - position`.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.length - self.position
    }

    /// Elements that can still be written from the current position: `capacity - position`.
    #[must_use]
    pub fn spare(&self) -> usize {
        self.capacity - self.position
    }

    /// Checks that `count` live elements follow the current position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if fewer than `count` elements remain.
    pub fn ensure_remaining(&self, count: usize) -> Result<()> {
        if count > self.remaining() {
            return Err(reject(out_of_range_error!(
                self.position,
                count,
                self.remaining()
            )));
        }
        Ok(())
    }

    /// Claims the next `count` live elements for reading and advances past them.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if fewer than `count` elements remain.
    pub fn claim_read(&mut self, count: usize) -> Result<Range<usize>> {
        self.ensure_remaining(count)?;

        let start = self.position;
        self.position += count;
        Ok(start..self.position)
    }

    /// Claims the next `count` elements for writing, advances past them and grows the
    /// logical length if the write ends beyond it.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the write would end beyond the capacity.
    pub fn claim_write(&mut self, count: usize) -> Result<Range<usize>> {
        let end = self
            .position
            .checked_add(count)
            .filter(|end| *end <= self.capacity)
            .ok_or_else(|| reject(out_of_range_error!(self.position, count, self.spare())))?;

        let start = self.position;
        self.position = end;
        if end > self.length {
            self.length = end;
        }
        Ok(start..end)
    }

    /// Claims everything between the position and the logical length.
    pub fn claim_rest(&mut self) -> Range<usize> {
        let start = self.position;
        self.position = self.length;
        start..self.length
    }

    /// Repositions the cursor relative to `origin`.
    ///
    /// Targets are computed against the position and the logical length, never against the
    /// capacity. On failure `requested` reports the distance that was asked for and `limit`
    /// the distance that was available in that direction.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the target lies outside `[0, length]`.
    pub fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<usize> {
        let base = match origin {
            SeekOrigin::Begin => 0,
            SeekOrigin::Current => self.position,
            SeekOrigin::End => self.length,
        };

        let distance = usize::try_from(offset.unsigned_abs()).unwrap_or(usize::MAX);
        let target = if offset < 0 {
            base.checked_sub(distance)
                .ok_or_else(|| reject(out_of_range_error!(self.position, distance, base)))?
        } else {
            base.checked_add(distance)
                .filter(|target| *target <= self.length)
                .ok_or_else(|| {
                    reject(out_of_range_error!(
                        self.position,
                        distance,
                        self.length - base
                    ))
                })?
        };

        self.position = target;
        Ok(target)
    }

    /// Moves the cursor to an absolute position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if `position > length`.
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position > self.length {
            return Err(reject(out_of_range_error!(
                self.position,
                position,
                self.length
            )));
        }

        self.position = position;
        Ok(())
    }

    /// Moves the cursor back to a previously observed position, clamped to the current length.
    pub fn restore_position(&mut self, position: usize) {
        self.position = position.min(self.length);
    }

    /// Sets the logical length, clamping the position down if it would lie beyond it.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if `length > capacity`.
    pub fn set_length(&mut self, length: usize) -> Result<()> {
        if length > self.capacity {
            return Err(reject(out_of_range_error!(
                self.position,
                length,
                self.capacity
            )));
        }

        self.length = length;
        if self.position > length {
            self.position = length;
        }
        Ok(())
    }

    /// Turns a write cursor into a read cursor over exactly what was written:
    /// `length = position`, then `position = 0`.
    pub fn flip(&mut self) {
        self.length = self.position;
        self.position = 0;
    }

    /// Resets to an empty cursor of the same capacity.
    pub fn clear(&mut self) {
        self.position = 0;
        self.length = 0;
    }
}

fn reject(error: crate::Error) -> crate::Error {
    log::trace!("cursor operation rejected: {error}");
    error
}
