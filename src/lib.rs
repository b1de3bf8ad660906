//! # result-stream-json
//!
//! Incremental JSON array encoder for result streams.
//!
//! A worker task produces [`ResultItem`]s one at a time over a channel;
//! [`StreamEncoder`] renders them as a single JSON array without ever
//! holding the whole sequence in memory.
//!
//! ## Behaviour
//!
//! - **Values** are serialized in arrival order, compact, with no HTML
//!   escaping
//! - **Errors** abort the encoding: the caller gets the error and no bytes
//! - **Draining**: on any early exit the producer is received from until
//!   end-of-stream, so the producing task is never left parked on a send
//!
//! ## Example
//!
//! ```
//! use result_stream_json::{spawn_producer, ResultSender, StreamEncoder};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (mut rx, _task) = spawn_producer(16, |tx: ResultSender<&str, String>| async move {
//!     tx.send("a").await.map_err(|e| e.to_string())?;
//!     tx.send("<b>").await.map_err(|e| e.to_string())?;
//!     Ok(())
//! });
//!
//! let bytes = StreamEncoder::new().encode(&mut rx).await.unwrap();
//! assert_eq!(&bytes[..], br#"["a","<b>"]"#);
//! # }
//! ```

pub mod buffer;
pub mod codec;
pub mod drain;
pub mod error;
pub mod producer;
pub mod sink;

mod encoder;
mod item;
mod task;

pub use buffer::OutputBuffer;
pub use drain::{drain, DrainGuard};
pub use encoder::{
    EncoderConfig, StreamEncoder, StreamEncoderBuilder, DEFAULT_CHANNEL_CAPACITY,
};
pub use error::{EncodeError, StreamClosed};
pub use item::ResultItem;
pub use producer::{Producer, ResultSender};
pub use sink::write_array;
pub use task::spawn_producer;
