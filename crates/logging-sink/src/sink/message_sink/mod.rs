use std::fmt;
use std::sync::Mutex;
use std::sync::atomic::AtomicU8;

use crate::layout::SinkLayout;
use crate::level::EmitLevel;
use crate::line_mode::LineMode;

/// Sink that renders reports into an [`std::io::Write`] target.
///
/// The writer lives behind a mutex together with the sink's [`LineMode`], so
/// a `MessageSink` can be shared through an [`Arc`](std::sync::Arc) and
/// written from several execution contexts. Each report is rendered through
/// the sink's [`SinkLayout`] and terminated according to its line mode.
/// Reports at or above the flush level (default [`EmitLevel::Warn`]) flush
/// the writer immediately.
///
/// # Examples
///
/// Collect reports into memory with newline terminators:
///
/// ```
/// use logging_sink::{EmitLevel, MessageSink, Sink};
///
/// let sink = MessageSink::memory();
/// sink.write(EmitLevel::Info, "top.dma: idle")?;
/// sink.write(EmitLevel::Error, "top.dma: overrun")?;
///
/// assert_eq!(sink.contents(), "top.dma: idle\ntop.dma: overrun\n");
/// # Ok::<(), std::io::Error>(())
/// ```
///
/// Render without a trailing newline:
///
/// ```
/// use logging_sink::{EmitLevel, LineMode, MessageSink, Sink};
///
/// let sink = MessageSink::with_line_mode(Vec::new(), LineMode::WithoutNewline);
/// sink.write(EmitLevel::Info, "ready")?;
///
/// assert_eq!(sink.into_inner(), b"ready".to_vec());
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct MessageSink<W> {
    state: Mutex<SinkState<W>>,
    layout: SinkLayout,
    minimum: AtomicU8,
    flush_on: EmitLevel,
}

struct SinkState<W> {
    writer: W,
    line_mode: LineMode,
}

mod constructors;
mod writing;

impl<W> fmt::Debug for MessageSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageSink")
            .field("layout", &self.layout)
            .field("line_mode", &self.line_mode())
            .field("minimum", &self.minimum_level_value())
            .field("flush_on", &self.flush_on)
            .finish_non_exhaustive()
    }
}
