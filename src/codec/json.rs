//! JSON element codec using `serde_json`.
//!
//! Values are written with the compact formatter straight into the
//! output buffer, so an element never exists as an intermediate `String`.
//!
//! `serde_json` applies only the escapes JSON requires (`"`, `\` and
//! control characters). HTML-sensitive characters (`<`, `>`, `&`) are
//! emitted literally.
//!
//! # Example
//!
//! ```
//! use result_stream_json::codec::JsonCodec;
//! use result_stream_json::OutputBuffer;
//!
//! let mut buf = OutputBuffer::new();
//! JsonCodec::encode_into(&mut buf, &"<b>&</b>").unwrap();
//! assert_eq!(buf.as_bytes(), br#""<b>&</b>""#);
//! ```

use serde::Serialize;

use crate::buffer::OutputBuffer;

/// Compact JSON codec for individual array elements.
pub struct JsonCodec;

impl JsonCodec {
    /// Serialize `value` as one JSON element, appended to `buf`.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the value cannot be serialized
    /// (for example a map with non-string keys). Bytes written before the
    /// failure stay in the buffer; the encoder discards the whole buffer
    /// on error.
    #[inline]
    pub fn encode_into<T: Serialize + ?Sized>(
        buf: &mut OutputBuffer,
        value: &T,
    ) -> serde_json::Result<()> {
        let mut ser = serde_json::Serializer::new(buf.writer());
        value.serialize(&mut ser)
    }

    /// Serialize `value` to a standalone byte vector.
    #[inline]
    pub fn encode<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(value)
    }
}
