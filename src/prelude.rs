//! # spanstream Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the spanstream library. Import this module to get the stream types together with the
//! [`ReadStream`] and [`WriteStream`] traits that carry their methods.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all spanstream operations
pub use crate::Error;

/// The result type used throughout spanstream
pub use crate::Result;

// ================================================================================================
// Streams
// ================================================================================================

/// Read-only and read-write streams over borrowed buffers
pub use crate::stream::{ByteStream, ReadOnlyByteStream};

/// The read and write protocols; required in scope to call stream methods
pub use crate::stream::{ReadStream, WriteStream};

/// Cursor bookkeeping and seek origins
pub use crate::stream::{BufferCursor, SeekOrigin};

/// Endian-aware primitive conversion
pub use crate::stream::ByteOrderIO;

// ================================================================================================
// Encoding Helpers
// ================================================================================================

/// Variable-length quantity codec
pub use crate::stream::vlq;

/// UTF-16 builder over `&mut [u16]`
pub use crate::text::CharBuilder;
