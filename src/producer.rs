//! Producer side of a result stream.
//!
//! A [`Producer`] is the receiving end of a single-consumer channel of
//! [`ResultItem`]s. `recv` yields items in send order and `None` once
//! every sender is gone; that end-of-stream signal is distinct from any
//! item.
//!
//! The encoder borrows a producer for one encode call and never owns it.
//!
//! # Example
//!
//! ```
//! use result_stream_json::producer::{channel, Producer};
//! use result_stream_json::ResultItem;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (tx, mut rx) = channel::<u32, String>(8);
//! tokio::spawn(async move {
//!     tx.send(1).await?;
//!     tx.fail("boom".to_string()).await
//! });
//!
//! assert_eq!(Producer::recv(&mut rx).await, Some(ResultItem::Value(1)));
//! assert!(Producer::recv(&mut rx).await.unwrap().is_error());
//! assert_eq!(Producer::recv(&mut rx).await, None);
//! # }
//! ```

use std::future::Future;

use tokio::sync::mpsc;

use crate::error::StreamClosed;
use crate::item::ResultItem;

/// Source of result items with an explicit end-of-stream.
pub trait Producer {
    /// Successful value type.
    type Value;
    /// Producer-reported error type.
    type Error;

    /// Receive the next item, waiting until one is available.
    ///
    /// Returns `None` once the stream has ended.
    fn recv(
        &mut self,
    ) -> impl Future<Output = Option<ResultItem<Self::Value, Self::Error>>> + Send;

    /// Stop accepting new items without waiting.
    ///
    /// Called when the consumer is abandoned and cannot drain. Pending
    /// and future sends must fail rather than block.
    fn close(&mut self);
}

impl<T: Send, E: Send> Producer for mpsc::Receiver<ResultItem<T, E>> {
    type Value = T;
    type Error = E;

    #[inline]
    fn recv(&mut self) -> impl Future<Output = Option<ResultItem<T, E>>> + Send {
        mpsc::Receiver::recv(self)
    }

    #[inline]
    fn close(&mut self) {
        mpsc::Receiver::close(self);
    }
}

impl<T: Send, E: Send> Producer for mpsc::UnboundedReceiver<ResultItem<T, E>> {
    type Value = T;
    type Error = E;

    #[inline]
    fn recv(&mut self) -> impl Future<Output = Option<ResultItem<T, E>>> + Send {
        mpsc::UnboundedReceiver::recv(self)
    }

    #[inline]
    fn close(&mut self) {
        mpsc::UnboundedReceiver::close(self);
    }
}

/// Typed sending half of a bounded result stream.
///
/// Cheaply cloneable. The stream ends when every clone is dropped.
pub struct ResultSender<T, E> {
    tx: mpsc::Sender<ResultItem<T, E>>,
}

impl<T, E> Clone for ResultSender<T, E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T, E> ResultSender<T, E> {
    /// Wrap an existing mpsc sender.
    pub fn new(tx: mpsc::Sender<ResultItem<T, E>>) -> Self {
        Self { tx }
    }

    /// Send a successful value, waiting for channel capacity.
    ///
    /// # Errors
    ///
    /// Returns [`StreamClosed`] if the consumer has gone away.
    pub async fn send(&self, value: T) -> Result<(), StreamClosed> {
        self.send_item(ResultItem::Value(value)).await
    }

    /// Send a terminal error.
    ///
    /// The consumer aborts on this item; anything sent afterwards is
    /// received and discarded.
    pub async fn fail(&self, err: E) -> Result<(), StreamClosed> {
        self.send_item(ResultItem::Error(err)).await
    }

    /// Send a raw item.
    pub async fn send_item(&self, item: ResultItem<T, E>) -> Result<(), StreamClosed> {
        self.tx.send(item).await.map_err(|_| StreamClosed)
    }

    /// Returns `true` if the receiving half has been dropped or closed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Create a bounded result stream.
///
/// `capacity` must be greater than zero.
pub fn channel<T, E>(capacity: usize) -> (ResultSender<T, E>, mpsc::Receiver<ResultItem<T, E>>) {
    let (tx, rx) = mpsc::channel(capacity);
    (ResultSender::new(tx), rx)
}

/// Create an unbounded result stream.
///
/// Senders never wait; use only when the producer is known to be finite.
pub fn unbounded_channel<T, E>() -> (
    mpsc::UnboundedSender<ResultItem<T, E>>,
    mpsc::UnboundedReceiver<ResultItem<T, E>>,
) {
    mpsc::unbounded_channel()
}
