use thiserror::Error;

/// Failure of a non-blocking or time-limited channel operation.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ChannelError<T> {
    /// The channel was full; the rejected item is handed back.
    #[error("channel is full")]
    Full(T),
    /// The channel was empty.
    #[error("channel is empty")]
    Empty,
    /// Nothing arrived before the deadline.
    #[error("timed out waiting for an item")]
    Timeout,
}

impl<T> ChannelError<T> {
    /// Returns the rejected item of a [`ChannelError::Full`] error.
    #[must_use]
    pub fn into_inner(self) -> Option<T> {
        match self {
            Self::Full(item) => Some(item),
            Self::Empty | Self::Timeout => None,
        }
    }
}
