//! Variable-length quantity (VLQ) codec.
//!
//! An unsigned integer is stored as big-endian groups of 7 payload bits, one group per byte.
//! Every byte but the last has its high bit (`0x80`) set:
//!
//! | Value       | Encoding              |
//! |-------------|-----------------------|
//! | `0`         | `00`                  |
//! | `127`       | `7F`                  |
//! | `128`       | `81 00`               |
//! | `16_384`    | `81 80 00`            |
//! | `2^35 - 1`  | `FF FF FF FF 7F`      |
//!
//! Decoding consumes at most [`MAX_VLQ_BYTES`] bytes (63 payload bits). A ninth byte that still
//! carries the continuation bit is rejected with [`crate::Error::MalformedVlq`], so hostile input
//! can never make the decoder loop for longer than that.
//!
//! # Examples
//!
//! ```rust
//! use spanstream::stream::vlq;
//!
//! let mut scratch = [0u8; vlq::MAX_VLQ_BYTES];
//! let encoded = vlq::encode(16_384, &mut scratch)?;
//! assert_eq!(encoded, &[0x81, 0x80, 0x00]);
//!
//! let (value, consumed) = vlq::decode_slice(encoded)?;
//! assert_eq!(value, 16_384);
//! assert_eq!(consumed, 3);
//! # Ok::<(), spanstream::Error>(())
//! ```

use crate::{Error, Result};

/// The maximum number of bytes a single VLQ may occupy.
pub const MAX_VLQ_BYTES: usize = 9;

/// The largest value that fits into [`MAX_VLQ_BYTES`] groups of 7 bits.
pub const MAX_VLQ_VALUE: u64 = (1 << (7 * MAX_VLQ_BYTES)) - 1;

/// Decodes one VLQ, pulling bytes from `next` one at a time.
///
/// `next` returns `None` once its source is exhausted.
///
/// # Errors
/// Returns [`crate::Error::UnexpectedEndOfStream`] if the source ends before a terminating byte,
/// or [`crate::Error::MalformedVlq`] if [`MAX_VLQ_BYTES`] bytes were consumed without one.
///
/// # Examples
///
/// ```rust
/// use spanstream::stream::vlq;
///
/// let mut bytes = [0x81, 0x00, 0x05].into_iter();
/// assert_eq!(vlq::decode(|| bytes.next())?, 128);
/// assert_eq!(vlq::decode(|| bytes.next())?, 5);
/// assert!(vlq::decode(|| bytes.next()).is_err());
/// # Ok::<(), spanstream::Error>(())
/// ```
pub fn decode<F>(next: F) -> Result<u64>
where
    F: FnMut() -> Option<u8>,
{
    decode_counted(next).map(|(value, _)| value)
}

/// Decodes one VLQ from the start of `data`, returning the value and the number of bytes it
/// occupied.
///
/// # Errors
/// See [`decode`].
pub fn decode_slice(data: &[u8]) -> Result<(u64, usize)> {
    let mut bytes = data.iter().copied();
    decode_counted(|| bytes.next())
}

fn decode_counted<F>(mut next: F) -> Result<(u64, usize)>
where
    F: FnMut() -> Option<u8>,
{
    let mut value = 0_u64;

    for consumed in 1..=MAX_VLQ_BYTES {
        let Some(byte) = next() else {
            return Err(Error::UnexpectedEndOfStream {
                requested: consumed,
                available: consumed - 1,
            });
        };

        value = (value << 7) | u64::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            return Ok((value, consumed));
        }
    }

    log::debug!("VLQ continuation exceeded {MAX_VLQ_BYTES} bytes");
    Err(Error::MalformedVlq {
        consumed: MAX_VLQ_BYTES,
    })
}

/// The number of bytes the minimal encoding of `value` occupies.
///
/// Values above [`MAX_VLQ_VALUE`] report the length they would need (10), which no encoder in
/// this crate produces.
#[must_use]
pub fn encoded_len(value: u64) -> usize {
    let bits = (u64::BITS - value.leading_zeros()) as usize;
    bits.div_ceil(7).max(1)
}

/// Encodes `value` into `scratch` and returns the used prefix.
///
/// # Errors
/// Returns [`crate::Error::MalformedVlq`] if `value` exceeds [`MAX_VLQ_VALUE`].
pub fn encode(value: u64, scratch: &mut [u8; MAX_VLQ_BYTES]) -> Result<&[u8]> {
    let len = encoded_len(value);
    if len > MAX_VLQ_BYTES {
        return Err(Error::MalformedVlq { consumed: len });
    }

    for (index, slot) in scratch[..len].iter_mut().enumerate() {
        let shift = 7 * (len - 1 - index);
        #[allow(clippy::cast_possible_truncation)]
        let group = ((value >> shift) & 0x7F) as u8;
        *slot = if index + 1 < len { group | 0x80 } else { group };
    }

    Ok(&scratch[..len])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(value: u64) {
        let mut scratch = [0u8; MAX_VLQ_BYTES];
        let encoded = encode(value, &mut scratch).unwrap().to_vec();
        assert_eq!(encoded.len(), encoded_len(value));
        assert_eq!(decode_slice(&encoded).unwrap(), (value, encoded.len()));
    }

    #[test]
    fn known_encodings() {
        let cases: &[(u64, &[u8])] = &[
            (0, &[0x00]),
            (127, &[0x7F]),
            (128, &[0x81, 0x00]),
            (16_383, &[0xFF, 0x7F]),
            (16_384, &[0x81, 0x80, 0x00]),
            ((1 << 35) - 1, &[0xFF, 0xFF, 0xFF, 0xFF, 0x7F]),
        ];

        for (value, expected) in cases {
            let mut scratch = [0u8; MAX_VLQ_BYTES];
            assert_eq!(encode(*value, &mut scratch).unwrap(), *expected);
            assert_eq!(decode_slice(expected).unwrap(), (*value, expected.len()));
        }
    }

    #[test]
    fn boundaries_roundtrip() {
        for value in [1, 0x3FFF, 0x4000, u64::from(u32::MAX), MAX_VLQ_VALUE] {
            roundtrip(value);
        }
    }

    #[test]
    fn max_value_uses_nine_bytes() {
        let mut scratch = [0u8; MAX_VLQ_BYTES];
        let encoded = encode(MAX_VLQ_VALUE, &mut scratch).unwrap();
        assert_eq!(encoded.len(), MAX_VLQ_BYTES);
        assert_eq!(encoded[..8], [0xFF; 8]);
        assert_eq!(encoded[8], 0x7F);
    }

    #[test]
    fn unencodable_values() {
        let mut scratch = [0u8; MAX_VLQ_BYTES];
        assert!(matches!(
            encode(MAX_VLQ_VALUE + 1, &mut scratch),
            Err(Error::MalformedVlq { consumed: 10 })
        ));
        assert!(encode(u64::MAX, &mut scratch).is_err());
    }

    #[test]
    fn nine_continuation_bytes_are_malformed() {
        let data = [0x80; 9];
        assert!(matches!(
            decode_slice(&data),
            Err(Error::MalformedVlq { consumed: 9 })
        ));

        // The decoder stops after nine bytes even if more follow.
        let mut pulled = 0;
        let result = decode(|| {
            pulled += 1;
            Some(0xFF)
        });
        assert!(result.is_err());
        assert_eq!(pulled, 9);
    }

    #[test]
    fn truncated_input() {
        assert!(matches!(
            decode_slice(&[]),
            Err(Error::UnexpectedEndOfStream {
                requested: 1,
                available: 0
            })
        ));
        assert!(matches!(
            decode_slice(&[0x81, 0x80]),
            Err(Error::UnexpectedEndOfStream {
                requested: 3,
                available: 2
            })
        ));
    }

    #[test]
    fn trailing_bytes_are_not_consumed() {
        assert_eq!(decode_slice(&[0x05, 0xAA, 0xBB]).unwrap(), (5, 1));
    }

    #[test]
    fn non_minimal_encodings_decode() {
        assert_eq!(decode_slice(&[0x80, 0x80, 0x05]).unwrap(), (5, 3));
    }
}
