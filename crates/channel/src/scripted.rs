use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::{Channel, ChannelGet, ChannelPut};

/// Consumer-side test channel that replays a script.
///
/// `get` never blocks: it returns the next scripted item, or `T::default()`
/// once the script is exhausted. Items put into the channel are appended to
/// the script.
///
/// # Examples
///
/// ```
/// use channel::{Channel, ChannelGet, ScriptedChannel};
///
/// let channel = ScriptedChannel::new("top.state_bus").with_script([3u32, 5]);
/// assert_eq!(channel.size(), 2);
/// assert_eq!(channel.get(), 3);
/// assert_eq!(channel.get(), 5);
/// assert_eq!(channel.get(), 0);
/// ```
#[derive(Debug)]
pub struct ScriptedChannel<T> {
    name: String,
    script: Mutex<VecDeque<T>>,
}

impl<T> ScriptedChannel<T> {
    /// Creates a channel with an empty script.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: Mutex::new(VecDeque::new()),
        }
    }

    /// Appends `items` to the script.
    #[must_use]
    pub fn with_script<I>(self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(items);
        self
    }
}

impl<T> Channel for ScriptedChannel<T> {
    fn size(&self) -> usize {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<T: Default> ChannelGet<T> for ScriptedChannel<T> {
    fn get(&self) -> T {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_default()
    }
}

impl<T> ChannelPut<T> for ScriptedChannel<T> {
    fn put(&self, item: T) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(item);
    }
}
