use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{MessageSink, SinkState};
use crate::layout::SinkLayout;
use crate::level::EmitLevel;
use crate::line_mode::LineMode;

impl<W> MessageSink<W> {
    /// Creates a sink with the plain layout that appends a newline after each report.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a plain-layout sink with the provided [`LineMode`].
    #[must_use]
    pub fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            state: Mutex::new(SinkState { writer, line_mode }),
            layout: SinkLayout::PLAIN,
            minimum: AtomicU8::new(EmitLevel::Trace.index()),
            flush_on: EmitLevel::Warn,
        }
    }

    /// Replaces the layout applied to every report.
    #[must_use]
    pub fn with_layout(mut self, layout: SinkLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the level at and above which each write flushes the writer.
    #[must_use]
    pub fn with_flush_on(mut self, level: EmitLevel) -> Self {
        self.flush_on = level;
        self
    }

    /// Sets the initial minimum level.
    #[must_use]
    pub fn with_minimum_level(self, level: EmitLevel) -> Self {
        self.minimum.store(level.index(), Ordering::Relaxed);
        self
    }

    /// Returns the layout applied to every report.
    #[must_use]
    pub const fn layout(&self) -> SinkLayout {
        self.layout
    }

    /// Returns the level at and above which writes flush.
    #[must_use]
    pub const fn flush_on(&self) -> EmitLevel {
        self.flush_on
    }

    /// Returns the current [`LineMode`].
    #[must_use]
    pub fn line_mode(&self) -> LineMode {
        self.lock().line_mode
    }

    /// Replaces the [`LineMode`] used for subsequent reports.
    pub fn set_line_mode(&self, line_mode: LineMode) {
        self.lock().line_mode = line_mode;
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .writer
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, SinkState<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn minimum_level_value(&self) -> EmitLevel {
        EmitLevel::from_index(self.minimum.load(Ordering::Relaxed))
    }

    pub(super) fn store_minimum_level(&self, level: EmitLevel) {
        self.minimum.store(level.index(), Ordering::Relaxed);
    }
}

impl<W> Default for MessageSink<W>
where
    W: Default,
{
    fn default() -> Self {
        Self::new(W::default())
    }
}

impl MessageSink<io::Stdout> {
    /// Console sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl MessageSink<File> {
    /// File sink writing to `path`. An existing file is truncated.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        File::create(path).map(Self::new)
    }
}

impl MessageSink<Vec<u8>> {
    /// In-memory sink, mostly useful for capturing output in tests.
    #[must_use]
    pub fn memory() -> Self {
        Self::new(Vec::new())
    }

    /// Returns everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock().writer).into_owned()
    }

    /// Returns the captured output split into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Discards the captured output.
    pub fn clear(&self) {
        self.lock().writer.clear();
    }
}
