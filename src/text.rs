//! UTF-16 text builder over a fixed-capacity buffer.
//!
//! [`CharBuilder`] is the character counterpart of [`crate::ByteStream`]: it appends UTF-16 code
//! units into a caller supplied `&mut [u16]` under the same cursor rules. Appends that would not
//! fit fail as a whole instead of growing or truncating.
//!
//! # Examples
//!
//! ```rust
//! use spanstream::text::CharBuilder;
//! use std::fmt::Write;
//!
//! let mut buffer = [0u16; 32];
//! let mut builder = CharBuilder::new(&mut buffer);
//! builder.append_str("id=")?;
//! write!(builder, "{}", 42).unwrap();
//! assert_eq!(builder.to_string_lossy(), "id=42");
//! # Ok::<(), spanstream::Error>(())
//! ```

use std::fmt;

use widestring::U16Str;

use crate::{stream::BufferCursor, stream::SeekOrigin, Result};

/// Appends UTF-16 code units into `&'a mut [u16]`.
#[derive(Debug)]
pub struct CharBuilder<'a> {
    buffer: &'a mut [u16],
    cursor: BufferCursor,
}

impl<'a> CharBuilder<'a> {
    /// Create an empty builder over `buffer`.
    #[must_use]
    pub fn new(buffer: &'a mut [u16]) -> Self {
        let cursor = BufferCursor::new(buffer.len());
        CharBuilder { buffer, cursor }
    }

    /// Create a builder over a buffer whose first `length` units are already populated.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if `length > buffer.len()`.
    pub fn with_length(buffer: &'a mut [u16], length: usize) -> Result<Self> {
        let cursor = BufferCursor::with_length(buffer.len(), length)?;
        Ok(CharBuilder { buffer, cursor })
    }

    /// The next unit to be accessed.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// The number of live units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cursor.len()
    }

    /// Returns `true` if no unit is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cursor.is_empty()
    }

    /// The fixed size of the backing buffer in units.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cursor.capacity()
    }

    /// Appends one code unit.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the builder is at capacity.
    pub fn append(&mut self, unit: u16) -> Result<()> {
        let range = self.cursor.claim_write(1)?;
        self.buffer[range.start] = unit;
        Ok(())
    }

    /// Appends a character as one or two code units.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the encoded character does not fit; nothing is
    /// written in that case.
    pub fn append_char(&mut self, ch: char) -> Result<()> {
        let mut scratch = [0u16; 2];
        let encoded = ch.encode_utf16(&mut scratch);
        self.append_units(encoded)
    }

    /// Appends a string.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the encoded string does not fit; nothing is
    /// written in that case.
    pub fn append_str(&mut self, text: &str) -> Result<()> {
        let needed = text.encode_utf16().count();
        let range = self.cursor.claim_write(needed)?;
        for (slot, unit) in self.buffer[range].iter_mut().zip(text.encode_utf16()) {
            *slot = unit;
        }
        Ok(())
    }

    /// Appends raw code units.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if `units` does not fit; nothing is written in that
    /// case.
    pub fn append_units(&mut self, units: &[u16]) -> Result<()> {
        let range = self.cursor.claim_write(units.len())?;
        self.buffer[range].copy_from_slice(units);
        Ok(())
    }

    /// Claims the next `len` units for the caller to fill in place and advances past them.
    ///
    /// Bounded by the capacity and grows the length like the append operations.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the span would end beyond the capacity.
    pub fn prepare_write_span(&mut self, len: usize) -> Result<&mut [u16]> {
        let range = self.cursor.claim_write(len)?;
        Ok(&mut self.buffer[range])
    }

    /// Repositions the builder and returns the new position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if the target lies outside `[0, length]`.
    pub fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<usize> {
        self.cursor.seek(offset, origin)
    }

    /// Sets the logical length; a position beyond it is clamped down.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfRange`] if `length` exceeds the capacity.
    pub fn set_length(&mut self, length: usize) -> Result<()> {
        self.cursor.set_length(length)
    }

    /// `length = position`, then `position = 0`.
    pub fn flip(&mut self) {
        self.cursor.flip();
    }

    /// Resets to an empty builder. The units are left as they are.
    pub fn clear(&mut self) {
        self.cursor.clear();
    }

    /// The unconsumed remainder `[position, length)`.
    #[must_use]
    pub fn content(&self) -> &U16Str {
        U16Str::from_slice(&self.buffer[self.cursor.position()..self.cursor.len()])
    }

    /// Everything built so far, `[0, length)`.
    #[must_use]
    pub fn written(&self) -> &U16Str {
        U16Str::from_slice(&self.buffer[..self.cursor.len()])
    }

    /// Decodes [`CharBuilder::written`], replacing unpaired surrogates with `U+FFFD`.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        self.written().to_string_lossy()
    }

    /// Decodes [`CharBuilder::written`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the content holds unpaired surrogates.
    pub fn try_to_string(&self) -> Result<String> {
        self.written()
            .to_string()
            .map_err(|error| malformed_error!("Invalid UTF-16 content - {}", error))
    }
}

impl fmt::Write for CharBuilder<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append_str(s).map_err(|_| fmt::Error)
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.append_char(c).map_err(|_| fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use super::*;
    use crate::Error;

    #[test]
    fn append_grows_until_capacity() {
        let mut buffer = [0u16; 4];
        let mut builder = CharBuilder::new(&mut buffer);
        builder.append(u16::from(b'a')).unwrap();
        builder.append_str("bc").unwrap();
        assert_eq!(builder.len(), 3);

        assert!(matches!(
            builder.append_str("de"),
            Err(Error::OutOfRange {
                requested: 2,
                limit: 1,
                ..
            })
        ));
        assert_eq!(builder.len(), 3);
        builder.append_char('d').unwrap();
        assert!(builder.append(0).is_err());
        assert_eq!(builder.to_string_lossy(), "abcd");
    }

    #[test]
    fn surrogate_pairs_are_atomic() {
        let mut buffer = [0u16; 3];
        let mut builder = CharBuilder::new(&mut buffer);
        builder.append_str("ab").unwrap();
        assert!(builder.append_char('😀').is_err());
        assert_eq!(builder.len(), 2);

        builder.set_length(1).unwrap();
        builder.seek(0, SeekOrigin::End).unwrap();
        builder.append_char('😀').unwrap();
        assert_eq!(builder.try_to_string().unwrap(), "a😀");
    }

    #[test]
    fn content_follows_position() {
        let mut buffer = [0u16; 8];
        let mut builder = CharBuilder::new(&mut buffer);
        builder.append_str("hello").unwrap();
        builder.flip();
        builder.seek(2, SeekOrigin::Begin).unwrap();
        assert_eq!(builder.content().to_string_lossy(), "llo");
        assert_eq!(builder.written().len(), 5);
    }

    #[test]
    fn prepare_write_span_fills_in_place() {
        let mut buffer = [0u16; 4];
        let mut builder = CharBuilder::new(&mut buffer);
        let span = builder.prepare_write_span(2).unwrap();
        span[0] = u16::from(b'o');
        span[1] = u16::from(b'k');
        assert_eq!(builder.to_string_lossy(), "ok");
        assert!(builder.prepare_write_span(3).is_err());
        assert_eq!(builder.position(), 2);
    }

    #[test]
    fn unpaired_surrogate() {
        let mut buffer = [0u16; 2];
        let mut builder = CharBuilder::new(&mut buffer);
        builder.append(0xD800).unwrap();
        assert!(matches!(
            builder.try_to_string(),
            Err(Error::Malformed { .. })
        ));
        assert_eq!(builder.to_string_lossy(), "\u{FFFD}");
    }

    #[test]
    fn fmt_write_reports_overflow() {
        let mut buffer = [0u16; 4];
        let mut builder = CharBuilder::new(&mut buffer);
        write!(builder, "{}", 12).unwrap();
        assert!(write!(builder, "{}", 345).is_err());
        assert_eq!(builder.to_string_lossy(), "12");

        builder.clear();
        assert!(builder.is_empty());
        assert_eq!(builder.capacity(), 4);
    }

    #[test]
    fn with_length_wraps_existing_text() {
        let mut buffer = [0u16; 6];
        for (slot, unit) in buffer.iter_mut().zip("abc".encode_utf16()) {
            *slot = unit;
        }
        let mut builder = CharBuilder::with_length(&mut buffer, 3).unwrap();
        builder.seek(0, SeekOrigin::End).unwrap();
        builder.append_str("def").unwrap();
        assert_eq!(builder.to_string_lossy(), "abcdef");
    }
}
