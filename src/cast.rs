//! Checked reinterpretation between element types.
//!
//! Thin wrappers over [`bytemuck`] that report failures as [`crate::Error::Cast`] instead of
//! panicking. They complement the stream's typed reads when a caller already holds a span
//! (e.g. one returned by [`crate::ReadOnlyByteStream::read_span`]) and wants to view it as
//! something other than bytes without copying.

use bytemuck::{AnyBitPattern, NoUninit, Pod};

use crate::Result;

/// Views `values` as a slice of `B`.
///
/// # Errors
/// Returns [`crate::Error::Cast`] if the byte length is not a multiple of `size_of::<B>()`
/// or the data is insufficiently aligned for `B`.
///
/// # Examples
///
/// ```rust
/// use spanstream::cast;
///
/// let words = [0x0102_u16, 0x0304];
/// let bytes: &[u8] = cast::cast_slice(&words)?;
/// assert_eq!(bytes.len(), 4);
/// # Ok::<(), spanstream::Error>(())
/// ```
pub fn cast_slice<A: NoUninit, B: AnyBitPattern>(values: &[A]) -> Result<&[B]> {
    Ok(bytemuck::try_cast_slice(values)?)
}

/// Views `values` mutably as a slice of `B`.
///
/// # Errors
/// Returns [`crate::Error::Cast`] on size or alignment mismatch.
pub fn cast_slice_mut<A: Pod, B: Pod>(values: &mut [A]) -> Result<&mut [B]> {
    Ok(bytemuck::try_cast_slice_mut(values)?)
}

/// Views `bytes` as exactly one `T`.
///
/// # Errors
/// Returns [`crate::Error::Cast`] if `bytes.len() != size_of::<T>()` or `bytes` is not
/// aligned for `T`.
pub fn single<T: AnyBitPattern>(bytes: &[u8]) -> Result<&T> {
    Ok(bytemuck::try_from_bytes(bytes)?)
}

/// Views `bytes` mutably as exactly one `T`.
///
/// # Errors
/// Returns [`crate::Error::Cast`] on size or alignment mismatch.
pub fn single_mut<T: Pod>(bytes: &mut [u8]) -> Result<&mut T> {
    Ok(bytemuck::try_from_bytes_mut(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn widen_and_narrow() {
        let words = [1_u32, 2, 3];
        let bytes: &[u8] = cast_slice(&words).unwrap();
        assert_eq!(bytes.len(), 12);

        let back: &[u32] = cast_slice(bytes).unwrap();
        assert_eq!(back, &words);
    }

    #[test]
    fn size_mismatch() {
        let bytes = [0u8; 3];
        let result: Result<&[u16]> = cast_slice(&bytes);
        assert!(matches!(result, Err(Error::Cast(_))));
    }

    #[test]
    fn single_requires_exact_length() {
        let words = [0x0403_0201_u32; 2];
        let bytes: &[u8] = cast_slice(&words).unwrap();
        let first: &u32 = single(&bytes[..4]).unwrap();
        assert_eq!(*first, 0x0403_0201);

        assert!(single::<u32>(&bytes[..3]).is_err());
    }

    #[test]
    fn mutable_views_write_through() {
        let mut words = [0_u16; 2];
        {
            let bytes: &mut [u8] = cast_slice_mut(&mut words).unwrap();
            bytes.fill(0xFF);
        }
        assert_eq!(words, [0xFFFF, 0xFFFF]);

        let mut raw = [0_u32; 1];
        let bytes: &mut [u8] = cast_slice_mut(&mut raw).unwrap();
        *single_mut::<u32>(bytes).unwrap() = 9;
        assert_eq!(raw[0], 9);
    }
}
