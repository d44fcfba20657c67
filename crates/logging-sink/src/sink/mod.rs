use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::level::EmitLevel;

mod async_sink;
mod message_sink;

pub use async_sink::{AsyncSink, DEFAULT_QUEUE_CAPACITY};
pub use message_sink::MessageSink;

/// Destination for composed reports.
///
/// Implementations are shared between execution contexts, so every method
/// takes `&self` and implementors synchronise internally.
pub trait Sink: Send + Sync {
    /// Writes one report at `level`. Reports below the minimum level are dropped.
    fn write(&self, level: EmitLevel, text: &str) -> io::Result<()>;

    /// Flushes buffered output to the underlying destination.
    fn flush(&self) -> io::Result<()>;

    /// Sets the lowest level the sink accepts.
    fn set_minimum_level(&self, level: EmitLevel);

    /// Returns the lowest level the sink accepts.
    fn minimum_level(&self) -> EmitLevel;

    /// Reports whether a write at `level` would produce output.
    fn enabled(&self, level: EmitLevel) -> bool {
        level != EmitLevel::Off && level >= self.minimum_level()
    }
}

/// Reference-counted handle used to share one sink between contexts.
pub type SharedSink = Arc<dyn Sink>;

/// Sink that accepts and discards every report.
#[derive(Debug, Default)]
pub struct NullSink {
    minimum: AtomicU8,
}

impl NullSink {
    /// Creates a null sink accepting every level.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            minimum: AtomicU8::new(EmitLevel::Trace as u8),
        }
    }
}

impl Sink for NullSink {
    fn write(&self, _level: EmitLevel, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }

    fn set_minimum_level(&self, level: EmitLevel) {
        self.minimum.store(level.index(), Ordering::Relaxed);
    }

    fn minimum_level(&self) -> EmitLevel {
        EmitLevel::from_index(self.minimum.load(Ordering::Relaxed))
    }
}
