//! Error types for result-stream-json.

use thiserror::Error;

/// Terminal failure of a single encode call.
///
/// Whatever the variant, no bytes accompany the error: the caller must
/// treat it as "nothing was written".
#[derive(Debug, Error)]
pub enum EncodeError<E> {
    /// Error reported by the producer through a `ResultItem::Error`.
    #[error("producer error: {0}")]
    Producer(E),

    /// A value could not be serialized to JSON.
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    /// The output sink failed (only raised by [`crate::sink`]).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl<E> EncodeError<E> {
    /// Returns `true` if the producer reported this error.
    #[inline]
    pub fn is_producer(&self) -> bool {
        matches!(self, Self::Producer(_))
    }

    /// Recover the producer's own error, if that is what this is.
    pub fn into_producer(self) -> Option<E> {
        match self {
            Self::Producer(err) => Some(err),
            _ => None,
        }
    }
}

/// The consumer side of a result stream has gone away.
///
/// Returned by [`ResultSender`](crate::producer::ResultSender) so the
/// producing task can stop early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("result stream closed")]
pub struct StreamClosed;

/// Result type alias for encode calls.
pub type Result<T, E> = std::result::Result<T, EncodeError<E>>;
