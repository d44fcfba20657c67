//! crates/channel/src/bounded.rs
//! Blocking FIFO of fixed capacity.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};

use crate::error::ChannelError;
use crate::{Channel, ChannelGet, ChannelPut};

/// FIFO channel holding at most `capacity` items.
///
/// Each clone owns both a sender and a receiver, so the queue stays
/// connected for as long as any clone is alive.
pub struct BoundedChannel<T> {
    name: Arc<str>,
    sender: Sender<T>,
    receiver: Receiver<T>,
    capacity: usize,
}

impl<T> BoundedChannel<T> {
    /// Creates an empty channel; a capacity of zero is raised to one.
    #[must_use]
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, receiver) = crossbeam_channel::bounded(capacity);
        Self {
            name: Arc::from(name.into()),
            sender,
            receiver,
            capacity,
        }
    }

    /// Maximum number of queued items.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Reports whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Reports whether `put` would block.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.sender.is_full()
    }

    /// Appends `item` unless the channel is full.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Full`] with the item when no slot is free.
    pub fn try_put(&self, item: T) -> Result<(), ChannelError<T>> {
        self.sender.try_send(item).map_err(|error| match error {
            TrySendError::Full(item) | TrySendError::Disconnected(item) => ChannelError::Full(item),
        })
    }

    /// Removes the oldest item unless the channel is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Empty`] when nothing is queued.
    pub fn try_get(&self) -> Result<T, ChannelError<T>> {
        self.receiver.try_recv().map_err(|_| ChannelError::Empty)
    }

    /// Removes the oldest item, waiting at most `timeout` for one to arrive.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Timeout`] when the deadline passes first.
    pub fn get_timeout(&self, timeout: Duration) -> Result<T, ChannelError<T>> {
        self.receiver
            .recv_timeout(timeout)
            .map_err(|error| match error {
                RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected => {
                    ChannelError::Timeout
                }
            })
    }
}

impl<T> Clone for BoundedChannel<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
            capacity: self.capacity,
        }
    }
}

impl<T> Channel for BoundedChannel<T> {
    fn size(&self) -> usize {
        self.receiver.len()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<T> ChannelPut<T> for BoundedChannel<T> {
    fn put(&self, item: T) {
        self.sender
            .send(item)
            .expect("channel keeps its own receiver alive");
    }
}

impl<T> ChannelGet<T> for BoundedChannel<T> {
    fn get(&self) -> T {
        self.receiver
            .recv()
            .expect("channel keeps its own sender alive")
    }
}

impl<T> fmt::Debug for BoundedChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedChannel")
            .field("name", &self.name)
            .field("size", &self.size())
            .field("capacity", &self.capacity)
            .finish()
    }
}
