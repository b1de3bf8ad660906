//! Output buffer for an encoded JSON array.
//!
//! Uses `bytes::BytesMut` so the finished array can be handed off as
//! `Bytes` without copying.
//!
//! The buffer is append-only with a single exception:
//! [`OutputBuffer::replace_last`] overwrites the most recently written
//! byte. The encoder uses it to turn the separator written after every
//! element into the closing bracket once the stream ends, which avoids
//! holding a pending item back for lookahead.
//!
//! # Example
//!
//! ```
//! use result_stream_json::OutputBuffer;
//!
//! let mut buf = OutputBuffer::new();
//! buf.extend_from_slice(b"[1,");
//! assert_eq!(buf.replace_last(b']'), Some(b','));
//! assert_eq!(buf.as_bytes(), b"[1]");
//! ```

use std::io;

use bytes::{BufMut, Bytes, BytesMut};

/// Default initial capacity (4KB).
pub const DEFAULT_CAPACITY: usize = 4 * 1024;

/// Append-only byte sink with a last-byte overwrite primitive.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    buf: BytesMut,
}

impl OutputBuffer {
    /// Create a buffer with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a buffer with a custom initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Append a single byte.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.buf.put_u8(byte);
    }

    /// Append a slice of bytes.
    #[inline]
    pub fn extend_from_slice(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// The most recently written byte, if any.
    #[inline]
    pub fn last(&self) -> Option<u8> {
        self.buf.last().copied()
    }

    /// Overwrite the most recently written byte.
    ///
    /// Returns the byte that was replaced, or `None` (and writes nothing)
    /// if the buffer is empty.
    pub fn replace_last(&mut self, byte: u8) -> Option<u8> {
        let last = self.buf.last_mut()?;
        Some(std::mem::replace(last, byte))
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// View the bytes written so far.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// An `io::Write` adapter that appends to this buffer.
    ///
    /// Used to drive `serde_json::Serializer` directly into the buffer.
    #[inline]
    pub fn writer(&mut self) -> BufferWriter<'_> {
        BufferWriter { buf: &mut self.buf }
    }

    /// Consume the buffer and return the written bytes (zero-copy).
    #[inline]
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}

/// `io::Write` view over an [`OutputBuffer`]. Writes never fail.
pub struct BufferWriter<'a> {
    buf: &'a mut BytesMut,
}

impl io::Write for BufferWriter<'_> {
    #[inline]
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    #[inline]
    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        self.buf.extend_from_slice(data);
        Ok(())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
