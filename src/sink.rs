//! Writing an encoded array to an async byte sink.
//!
//! The array is fully encoded before the first byte reaches the sink, so
//! a failed stream leaves the sink untouched and the caller is free to
//! write a failure response from scratch.

use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::encoder::StreamEncoder;
use crate::error::Result;
use crate::producer::Producer;

/// Encode `producer` and write the resulting array to `writer`.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// - [`EncodeError::Producer`](crate::EncodeError::Producer) or
///   [`EncodeError::Json`](crate::EncodeError::Json) from encoding;
///   nothing has been written in that case
/// - [`EncodeError::Io`](crate::EncodeError::Io) if writing or flushing fails
pub async fn write_array<P, W>(
    encoder: &StreamEncoder,
    producer: &mut P,
    writer: &mut W,
) -> Result<usize, P::Error>
where
    P: Producer,
    P::Value: Serialize,
    W: AsyncWrite + Unpin,
{
    let bytes = encoder.encode(producer).await?;
    writer.write_all(&bytes).await?;
    writer.flush().await?;
    Ok(bytes.len())
}
