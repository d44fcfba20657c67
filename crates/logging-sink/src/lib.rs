#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides the output side of the simulation report pipeline.
//! The `logging` crate composes a report into a single line of text and hands
//! it to a [`Sink`] together with the [`EmitLevel`] derived from the record's
//! severity. Sinks decide whether the level passes their minimum, decorate the
//! text according to their [`SinkLayout`], and write it out.
//!
//! # Design
//!
//! [`MessageSink`] wraps any [`std::io::Write`] implementor behind a mutex so a
//! single sink can be shared between execution contexts through an
//! [`std::sync::Arc`]. Three writers cover the usual destinations:
//!
//! - [`std::io::Stdout`] for the console ([`MessageSink::stdout`]);
//! - [`std::fs::File`] for the persisted log ([`MessageSink::create`]);
//! - [`Vec<u8>`] for in-memory capture ([`MessageSink::memory`]).
//!
//! [`NullSink`] discards everything, and [`AsyncSink`] moves the writes of any
//! other sink onto a dedicated writer thread fed by a bounded queue. With the
//! `tracing` feature, `TracingSink` forwards reports as `tracing` events.
//!
//! # Invariants
//!
//! - A sink never reorders writes: the async queue is FIFO and drained by a
//!   single thread.
//! - Writes at [`EmitLevel::Warn`] or above flush the underlying writer
//!   immediately by default.
//! - [`EmitLevel::Off`] is only a threshold; nothing is ever written at it.
//!
//! # Errors
//!
//! All operations surface [`std::io::Error`] values originating from the
//! underlying writer. [`AsyncSink`] reports write failures from its worker on
//! the next [`Sink::flush`].
//!
//! # Examples
//!
//! Capture two reports in memory and inspect the output:
//!
//! ```
//! use logging_sink::{EmitLevel, MessageSink, Sink, SinkLayout};
//!
//! let sink = MessageSink::memory().with_layout(SinkLayout::console(true, false));
//! sink.write(EmitLevel::Info, "top.cpu: booted")?;
//! sink.write(EmitLevel::Warn, "top.cpu: stalled")?;
//!
//! assert_eq!(sink.lines(), vec!["[I] top.cpu: booted", "[W] top.cpu: stalled"]);
//! # Ok::<(), std::io::Error>(())
//! ```

mod layout;
mod level;
mod line_mode;
mod sink;
#[cfg(feature = "tracing")]
mod tracing_sink;

pub use layout::{SeverityTag, SinkLayout};
pub use level::EmitLevel;
pub use line_mode::LineMode;
pub use sink::{AsyncSink, DEFAULT_QUEUE_CAPACITY, MessageSink, NullSink, SharedSink, Sink};
#[cfg(feature = "tracing")]
pub use tracing_sink::{TracingSink, init_tracing};
