//! Stream bridge: producer in, JSON array out.
//!
//! [`StreamEncoder::encode`] receives items one at a time and serializes
//! each value straight into the output buffer, so at most one item is
//! ever held in memory.
//!
//! # Layout
//!
//! ```text
//! [            opening bracket
//! v1,          element + placeholder separator
//! v2,          ...
//! ]            end-of-stream rewrites the trailing ',' into ']'
//! ```
//!
//! An already-closed producer yields `[]` directly.
//!
//! # Failure
//!
//! A `ResultItem::Error`, or a value that fails to serialize, aborts the
//! call. The producer is drained to end-of-stream first, then the error
//! is returned and the partial buffer is discarded.
//!
//! # Example
//!
//! ```
//! use result_stream_json::producer::channel;
//! use result_stream_json::StreamEncoder;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (tx, mut rx) = channel::<u32, String>(4);
//! tokio::spawn(async move {
//!     for i in 1..=3 {
//!         tx.send(i).await?;
//!     }
//!     Ok::<_, result_stream_json::StreamClosed>(())
//! });
//!
//! let bytes = StreamEncoder::new().encode(&mut rx).await.unwrap();
//! assert_eq!(&bytes[..], b"[1,2,3]");
//! # }
//! ```

use std::future::Future;

use bytes::Bytes;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::buffer::{OutputBuffer, DEFAULT_CAPACITY};
use crate::codec::JsonCodec;
use crate::drain::DrainGuard;
use crate::error::{EncodeError, Result};
use crate::item::ResultItem;
use crate::producer::{Producer, ResultSender};
use crate::task;

/// Default channel capacity used by [`spawn_producer`](crate::spawn_producer).
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Configuration for the stream encoder.
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Initial capacity of the output buffer.
    pub initial_capacity: usize,
    /// Capacity of channels created on the encoder's behalf.
    pub channel_capacity: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Builder for [`StreamEncoder`].
#[derive(Debug, Default)]
pub struct StreamEncoderBuilder {
    config: EncoderConfig,
}

impl StreamEncoderBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial output buffer capacity.
    ///
    /// Default: 4KB
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    /// Set the channel capacity used by `spawn_producer`.
    ///
    /// Default: 64
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.config.channel_capacity = capacity;
        self
    }

    /// Build the encoder.
    pub fn build(self) -> StreamEncoder {
        StreamEncoder::with_config(self.config)
    }
}

/// Encodes a producer's result stream as a single JSON array.
///
/// Holds configuration only; one encoder can serve many encode calls.
#[derive(Debug, Clone, Default)]
pub struct StreamEncoder {
    config: EncoderConfig,
}

impl StreamEncoder {
    /// Create an encoder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with the given configuration.
    pub fn with_config(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Create a builder.
    pub fn builder() -> StreamEncoderBuilder {
        StreamEncoderBuilder::new()
    }

    /// Current configuration.
    #[inline]
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Spawn `produce` on a channel sized by `channel_capacity`.
    ///
    /// See [`spawn_producer`](crate::spawn_producer).
    pub fn spawn_producer<T, E, F, Fut>(
        &self,
        produce: F,
    ) -> (mpsc::Receiver<ResultItem<T, E>>, JoinHandle<()>)
    where
        T: Send + 'static,
        E: Send + std::fmt::Display + 'static,
        F: FnOnce(ResultSender<T, E>) -> Fut + Send + 'static,
        Fut: Future<Output = std::result::Result<(), E>> + Send + 'static,
    {
        task::spawn_producer(self.config.channel_capacity, produce)
    }

    /// Encode every item of `producer` into one JSON array.
    ///
    /// Returns the complete array on success. On failure returns the
    /// error and no bytes; in both cases the producer has reached
    /// end-of-stream by the time this returns.
    ///
    /// If the returned future is dropped before completion, the producer
    /// is closed so its sends fail instead of blocking.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::Producer`] if the producer sent an error item
    /// - [`EncodeError::Json`] if a value could not be serialized
    pub async fn encode<P>(&self, producer: &mut P) -> Result<Bytes, P::Error>
    where
        P: Producer,
        P::Value: Serialize,
    {
        let mut buf = OutputBuffer::with_capacity(self.config.initial_capacity);
        buf.push(b'[');

        let mut producer = DrainGuard::new(producer);

        let mut item = match producer.recv().await {
            Some(item) => item,
            None => {
                producer.disarm();
                buf.push(b']');
                return Ok(buf.freeze());
            }
        };

        let mut count = 0usize;
        loop {
            let value = match item {
                ResultItem::Value(value) => value,
                ResultItem::Error(err) => {
                    let discarded = producer.drain().await;
                    tracing::debug!(
                        "Producer failed after {} elements, drained {} items",
                        count,
                        discarded
                    );
                    return Err(EncodeError::Producer(err));
                }
            };

            if let Err(e) = JsonCodec::encode_into(&mut buf, &value) {
                let discarded = producer.drain().await;
                tracing::debug!(
                    "Element {} failed to encode ({}), drained {} items",
                    count,
                    e,
                    discarded
                );
                return Err(EncodeError::Json(e));
            }
            buf.push(b',');
            count += 1;
            tracing::trace!("Encoded element {}", count);

            item = match producer.recv().await {
                Some(next) => next,
                None => break,
            };
        }

        producer.disarm();
        buf.replace_last(b']');
        tracing::trace!("Encoded {} elements ({} bytes)", count, buf.len());
        Ok(buf.freeze())
    }
}
