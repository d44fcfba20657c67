#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `channel` carries typed transactions between model components. A producer
//! sees a [`ChannelPut`], a consumer a [`ChannelGet`]; both report the number
//! of queued items and the channel's name.
//!
//! # Design
//!
//! - [`BoundedChannel`] is a FIFO of fixed capacity. `put` blocks while the
//!   channel is full and `get` blocks while it is empty. Clones share the
//!   same queue, so one clone can be handed to each side.
//! - [`ScriptedChannel`] replays a fixed sequence and then yields default
//!   values, standing in for a producer in component tests.
//!
//! # Examples
//!
//! ```
//! use std::thread;
//! use channel::{BoundedChannel, Channel, ChannelGet, ChannelPut};
//!
//! let pipeline = BoundedChannel::new("top.boc", 2);
//! let producer = pipeline.clone();
//! let handle = thread::spawn(move || {
//!     for cycle in 0..4u32 {
//!         producer.put(cycle);
//!     }
//! });
//!
//! let received: Vec<u32> = (0..4).map(|_| pipeline.get()).collect();
//! handle.join().unwrap();
//! assert_eq!(received, [0, 1, 2, 3]);
//! assert_eq!(pipeline.name(), "top.boc");
//! assert_eq!(pipeline.size(), 0);
//! ```

mod bounded;
mod error;
mod scripted;

pub use bounded::BoundedChannel;
pub use error::ChannelError;
pub use scripted::ScriptedChannel;

/// Properties shared by both ends of a channel.
pub trait Channel {
    /// Number of items currently queued.
    fn size(&self) -> usize;

    /// Hierarchical name of the channel.
    fn name(&self) -> &str;
}

/// Producer end of a channel.
pub trait ChannelPut<T>: Channel {
    /// Appends `item`, blocking while the channel is full.
    fn put(&self, item: T);
}

/// Consumer end of a channel.
pub trait ChannelGet<T>: Channel {
    /// Removes the oldest item, blocking while the channel is empty.
    fn get(&self) -> T;
}
