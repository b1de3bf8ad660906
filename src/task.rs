//! Running a producer on its own task.
//!
//! [`spawn_producer`] wires a fresh bounded channel to a producing
//! closure and spawns it on the tokio runtime:
//!
//! ```text
//! closure(ResultSender) ─► mpsc ─► Receiver ─► StreamEncoder
//! ```
//!
//! If the closure returns `Err`, the error is sent as the terminal item,
//! so the consumer sees it the same way as an explicit `fail`.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::item::ResultItem;
use crate::producer::{channel, ResultSender};

/// Spawn `produce` on a new task and return the receiving half.
///
/// The stream ends when `produce` completes and its sender is dropped.
/// The join handle resolves once the task exits; with the receiver
/// drained or dropped it never stays parked on a send.
///
/// `capacity` must be greater than zero.
pub fn spawn_producer<T, E, F, Fut>(
    capacity: usize,
    produce: F,
) -> (mpsc::Receiver<ResultItem<T, E>>, JoinHandle<()>)
where
    T: Send + 'static,
    E: Send + std::fmt::Display + 'static,
    F: FnOnce(ResultSender<T, E>) -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
{
    let (tx, rx) = channel(capacity);

    let task = tokio::spawn(async move {
        if let Err(e) = produce(tx.clone()).await {
            let message = e.to_string();
            if tx.fail(e).await.is_err() {
                tracing::error!("Producer error after consumer went away: {}", message);
            }
        }
    });

    (rx, task)
}
