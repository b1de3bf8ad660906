//! Tagged result items flowing from a producer to the encoder.

/// One element of a producer's output stream.
///
/// `Error` is terminal: once one is observed, nothing received after it
/// is treated as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultItem<T, E> {
    /// A successful value, encoded as one array element.
    Value(T),
    /// A failure that aborts the whole encoding.
    Error(E),
}

impl<T, E> ResultItem<T, E> {
    /// Returns `true` if this item carries an error.
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Returns `true` if this item carries a value.
    #[inline]
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Convert into a standard `Result`.
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Error(err) => Err(err),
        }
    }
}

impl<T, E> From<Result<T, E>> for ResultItem<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Value(value),
            Err(err) => Self::Error(err),
        }
    }
}
