//! Draining an abandoned producer.
//!
//! When the encoder stops before end-of-stream, the producing task may
//! still be waiting to hand off items. Leaving them unreceived would park
//! that task forever on a full channel, so every early exit goes through
//! one of two paths:
//!
//! - [`drain`]: receive and discard until end-of-stream. Used on the
//!   error paths, where the encoder can still await.
//! - [`DrainGuard`]: armed for the duration of the receive loop. If the
//!   encode future is dropped mid-stream, `Drop` cannot await, so the
//!   guard closes the producer instead. Pending and future sends then
//!   fail immediately.

use std::ops::{Deref, DerefMut};

use crate::producer::Producer;

/// Receive and discard items until the producer signals end-of-stream.
///
/// Returns the number of items discarded. A producer that is already
/// closed returns `0` straight away.
pub async fn drain<P: Producer>(producer: &mut P) -> usize {
    let mut discarded = 0;
    while producer.recv().await.is_some() {
        discarded += 1;
    }
    discarded
}

/// Guard that closes a producer on drop unless disarmed.
///
/// Dereferences to the wrapped producer so the receive loop can use it
/// while the guard is armed.
pub struct DrainGuard<'a, P: Producer> {
    producer: &'a mut P,
    armed: bool,
}

impl<'a, P: Producer> DrainGuard<'a, P> {
    /// Arm a guard over `producer`.
    pub fn new(producer: &'a mut P) -> Self {
        Self {
            producer,
            armed: true,
        }
    }

    /// Drain the producer to end-of-stream and disarm.
    ///
    /// Returns the number of items discarded.
    pub async fn drain(mut self) -> usize {
        let discarded = drain(self.producer).await;
        self.armed = false;
        discarded
    }

    /// Disarm the guard (the producer has already reached end-of-stream).
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Returns `true` if dropping the guard would close the producer.
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

impl<P: Producer> Deref for DrainGuard<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.producer
    }
}

impl<P: Producer> DerefMut for DrainGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.producer
    }
}

impl<P: Producer> Drop for DrainGuard<'_, P> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!("Encode abandoned mid-stream, closing producer");
            self.producer.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producer::channel;

    #[tokio::test]
    async fn test_drain_counts_items() {
        let (tx, mut rx) = channel::<i32, String>(8);
        for i in 0..3 {
            tx.send(i).await.unwrap();
        }
        tx.fail("late".to_string()).await.unwrap();
        drop(tx);

        assert_eq!(drain(&mut rx).await, 4);
    }

    #[tokio::test]
    async fn test_drain_closed_is_noop() {
        let (tx, mut rx) = channel::<i32, String>(1);
        drop(tx);

        assert_eq!(drain(&mut rx).await, 0);
        assert_eq!(drain(&mut rx).await, 0);
    }

    #[tokio::test]
    async fn test_drain_unblocks_producer_task() {
        // Capacity 1: without draining, the producer would park on send #2.
        let (tx, mut rx) = channel::<i32, String>(1);
        let task = tokio::spawn(async move {
            for i in 0..100 {
                tx.send(i).await.unwrap();
            }
        });

        assert_eq!(drain(&mut rx).await, 100);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_guard_closes_on_drop() {
        let (tx, mut rx) = channel::<i32, String>(1);
        {
            let guard = DrainGuard::new(&mut rx);
            assert!(guard.is_armed());
        }
        assert!(tx.send(1).await.is_err());
    }

    #[tokio::test]
    async fn test_guard_disarm_keeps_producer_open() {
        let (tx, mut rx) = channel::<i32, String>(1);
        {
            let mut guard = DrainGuard::new(&mut rx);
            guard.disarm();
        }
        assert!(tx.send(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_guard_drain_disarms() {
        let (tx, mut rx) = channel::<i32, String>(4);
        tx.send(1).await.unwrap();
        tx.send(2).await.unwrap();
        drop(tx);

        let guard = DrainGuard::new(&mut rx);
        assert_eq!(guard.drain().await, 2);
    }
}
