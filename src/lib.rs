// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # spanstream
//!
//! Bounds-checked binary cursors over memory the caller owns.
//!
//! `spanstream` wraps a borrowed byte buffer in a stream with a position, a logical length and
//! a fixed capacity. Reads, writes and seeks are checked against those three values, and an
//! operation that cannot be satisfied fails without touching the stream. The streams never
//! allocate, grow or copy the buffer they wrap.
//!
//! ## Features
//!
//! - **Zero-copy reads** - spans returned by [`ReadOnlyByteStream`] borrow the original buffer
//! - **Typed access** - plain-old-data values and slices via [`bytemuck`], explicit endianness via [`ByteOrderIO`]
//! - **VLQ framing** - length-prefixed sub-streams that can be nested and skipped
//! - **Atomic failures** - a failed call leaves position and length exactly as they were
//! - **`std::io` interop** - copy into any [`std::io::Write`], fill from any [`std::io::Read`]
//! - **UTF-16 building** - [`CharBuilder`] applies the same cursor rules to `&mut [u16]`
//!
//! ## Quick Start
//!
//! ```rust
//! use spanstream::prelude::*;
//!
//! let mut buffer = [0u8; 64];
//! let mut writer = ByteStream::new(&mut buffer);
//! writer.write_le(0xCAFE_u16)?;
//! writer.write_sub_stream(b"payload")?;
//! writer.write_vlq(300)?;
//! writer.flip();
//!
//! let mut reader = writer.as_read_only();
//! assert_eq!(reader.read_le::<u16>()?, 0xCAFE);
//! assert_eq!(reader.read_sub_stream_range()?, b"payload");
//! assert_eq!(reader.read_vlq()?, 300);
//! assert_eq!(reader.remaining(), 0);
//! # Ok::<(), spanstream::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`stream`] - [`BufferCursor`], the [`ReadStream`] / [`WriteStream`] protocols and both stream types
//! - [`stream::vlq`] - the variable-length quantity codec used for framing
//! - [`text`] - [`CharBuilder`], a UTF-16 builder over a fixed buffer
//! - [`cast`] - checked reinterpretation of spans
//! - [`Error`] and [`Result`] - error handling
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result):
//!
//! ```rust
//! use spanstream::{Error, ReadOnlyByteStream, ReadStream};
//!
//! let data = [0x81, 0x80];
//! let mut reader = ReadOnlyByteStream::new(&data);
//! match reader.read_vlq() {
//!     Err(Error::UnexpectedEndOfStream { .. }) => println!("truncated"),
//!     Err(e) => println!("other error: {e}"),
//!     Ok(value) => println!("value: {value}"),
//! }
//! assert_eq!(reader.position(), 0);
//! ```
//!
//! ## Development and Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! cargo +nightly fuzz run frames --release
//! ```
#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use spanstream::prelude::*;
///
/// let data = [1, 2, 3];
/// let mut reader = ReadOnlyByteStream::new(&data);
/// assert_eq!(reader.read_byte(), Some(1));
/// ```
pub mod prelude;

/// Checked reinterpretation of byte spans as other plain-old-data types.
pub mod cast;

/// Binary streams over borrowed buffers, the cursor they share and the VLQ codec.
///
/// # Key Types
///
/// - [`stream::BufferCursor`] - position / length / capacity bookkeeping
/// - [`stream::ReadStream`] - the read protocol, shared by both streams
/// - [`stream::WriteStream`] - the write protocol
/// - [`stream::ReadOnlyByteStream`] - read-only stream over `&[u8]`
/// - [`stream::ByteStream`] - read-write stream over `&mut [u8]`
pub mod stream;

/// UTF-16 text building over a fixed-capacity `&mut [u16]`.
pub mod text;

/// `spanstream` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `spanstream` Error type
///
/// See [`error::Error`](Error) for the variants and how each stream operation reports them.
pub use error::Error;

pub use stream::{
    vlq, BufferCursor, ByteOrderIO, ByteStream, ReadOnlyByteStream, ReadStream, SeekOrigin,
    WriteStream, DEFAULT_COPY_CHUNK,
};

pub use text::CharBuilder;
