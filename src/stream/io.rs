//! Endian-aware conversion of primitive values to and from their byte representation.
//!
//! The raw operations ([`crate::ReadStream::read_value`], [`crate::WriteStream::write_value`])
//! copy the in-memory representation of a plain-data type verbatim, which is native-endian.
//! Wire and file formats usually fix the byte order instead; [`ByteOrderIO`] is the bound used by
//! [`crate::ReadStream::read_le`], [`crate::ReadStream::read_be`] and their write counterparts.
//!
//! # Supported Types
//! - **Unsigned integers**: `u8`, `u16`, `u32`, `u64`, `u128`, `usize`
//! - **Signed integers**: `i8`, `i16`, `i32`, `i64`, `i128`, `isize`
//! - **Floating point**: `f32`, `f64`
//!
//! # Examples
//!
//! ```rust
//! use spanstream::prelude::*;
//!
//! let mut buffer = [0u8; 6];
//! let mut stream = ByteStream::new(&mut buffer);
//! stream.write_le(0x0201_u16)?;
//! stream.write_be(0x0304_0506_u32)?;
//!
//! stream.flip();
//! assert_eq!(stream.content(), &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
//! assert_eq!(stream.read_le::<u16>()?, 0x0201);
//! assert_eq!(stream.read_be::<u32>()?, 0x0304_0506);
//! # Ok::<(), spanstream::Error>(())
//! ```

/// Trait for primitive types with a fixed-size byte representation in either byte order.
///
/// Each implementation defines a `Bytes` associated type that represents the fixed-size
/// byte array required for that particular type (e.g., `[u8; 4]` for `u32`).
pub trait ByteOrderIO: Sized + Copy {
    /// The byte array type holding one encoded value.
    type Bytes: Sized + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Decode from little-endian bytes.
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
    /// Decode from big-endian bytes.
    fn from_be_bytes(bytes: Self::Bytes) -> Self;

    /// Encode as little-endian bytes.
    fn to_le_bytes(self) -> Self::Bytes;
    /// Encode as big-endian bytes.
    fn to_be_bytes(self) -> Self::Bytes;
}

macro_rules! impl_byte_order_io {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ByteOrderIO for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }

                fn to_le_bytes(self) -> Self::Bytes {
                    <$ty>::to_le_bytes(self)
                }

                fn to_be_bytes(self) -> Self::Bytes {
                    <$ty>::to_be_bytes(self)
                }
            }
        )*
    };
}

impl_byte_order_io!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, usize, isize, f32, f64);

/// Decodes one little-endian `T` from a slice of exactly `size_of::<T>()` bytes.
pub(crate) fn decode_le<T: ByteOrderIO>(bytes: &[u8]) -> Option<T> {
    let Ok(raw) = <T::Bytes>::try_from(bytes) else {
        return None;
    };
    Some(T::from_le_bytes(raw))
}

/// Decodes one big-endian `T` from a slice of exactly `size_of::<T>()` bytes.
pub(crate) fn decode_be<T: ByteOrderIO>(bytes: &[u8]) -> Option<T> {
    let Ok(raw) = <T::Bytes>::try_from(bytes) else {
        return None;
    };
    Some(T::from_be_bytes(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_both_orders() {
        let data = [0x01, 0x02, 0x03, 0x04];
        assert_eq!(decode_le::<u32>(&data), Some(0x0403_0201));
        assert_eq!(decode_be::<u32>(&data), Some(0x0102_0304));
        assert_eq!(decode_le::<i16>(&[0xFF, 0xFF]), Some(-1));
        assert_eq!(decode_be::<u16>(&data[..2]), Some(0x0102));
    }

    #[test]
    fn decode_rejects_wrong_size() {
        assert_eq!(decode_le::<u32>(&[0x01, 0x02]), None);
        assert_eq!(decode_be::<u64>(&[0x00; 9]), None);
    }

    #[test]
    fn encode_floats() {
        let value = 1.5_f64;
        let le = ByteOrderIO::to_le_bytes(value);
        let be = ByteOrderIO::to_be_bytes(value);
        assert_eq!(decode_le::<f64>(&le), Some(1.5));
        assert_eq!(decode_be::<f64>(&be), Some(1.5));
        let mut reversed = le;
        reversed.reverse();
        assert_eq!(reversed, be);
    }

    #[test]
    fn pointer_sized() {
        let bytes = ByteOrderIO::to_le_bytes(42_usize);
        assert_eq!(bytes.as_ref().len(), std::mem::size_of::<usize>());
        assert_eq!(decode_le::<usize>(bytes.as_ref()), Some(42));
    }
}
