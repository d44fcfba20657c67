use std::fmt;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};

use super::Sink;
use crate::level::EmitLevel;

/// Queue depth used by [`AsyncSink::new`].
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Message sent to the writer thread.
enum WriterMessage {
    /// A report to forward to the wrapped sink.
    Write(EmitLevel, String),
    /// Flush request; the writer answers once everything queued before it is written.
    Flush(Sender<io::Result<()>>),
    /// Shutdown signal.
    Shutdown,
}

/// Sink that hands reports to a dedicated writer thread.
///
/// Writes are queued on a bounded channel and drained in order by a single
/// thread that forwards them to the wrapped sink. A full queue blocks the
/// caller (backpressure). [`Sink::flush`] waits until every report queued
/// before it has been written and the wrapped sink has been flushed.
/// Dropping the sink drains the queue and joins the writer.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use logging_sink::{AsyncSink, EmitLevel, MessageSink, Sink};
///
/// let memory = Arc::new(MessageSink::memory());
/// let sink = AsyncSink::new(memory.clone())?;
/// sink.write(EmitLevel::Info, "queued")?;
/// sink.flush()?;
///
/// assert_eq!(memory.lines(), vec!["queued"]);
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct AsyncSink {
    /// Sender to the writer thread.
    sender: Sender<WriterMessage>,
    /// Handle to the writer thread.
    handle: Option<JoinHandle<()>>,
    /// Sink drained by the writer thread.
    inner: Arc<dyn Sink>,
    capacity: usize,
}

impl AsyncSink {
    /// Wraps `inner` with a queue of [`DEFAULT_QUEUE_CAPACITY`] entries.
    pub fn new(inner: Arc<dyn Sink>) -> io::Result<Self> {
        Self::with_capacity(inner, DEFAULT_QUEUE_CAPACITY)
    }

    /// Wraps `inner` with a queue holding up to `capacity` reports.
    ///
    /// Fails only when the writer thread cannot be spawned.
    pub fn with_capacity(inner: Arc<dyn Sink>, capacity: usize) -> io::Result<Self> {
        let capacity = capacity.max(1);
        let (sender, receiver) = crossbeam_channel::bounded(capacity);
        let worker = Arc::clone(&inner);
        let handle = thread::Builder::new()
            .name("report-writer".to_owned())
            .spawn(move || writer_thread_main(&receiver, worker.as_ref()))?;

        Ok(Self {
            sender,
            handle: Some(handle),
            inner,
            capacity,
        })
    }

    /// Returns the queue depth.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of reports waiting for the writer thread.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.sender.len()
    }

    fn send(&self, message: WriterMessage) -> io::Result<()> {
        self.sender
            .send(message)
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "writer thread has terminated"))
    }
}

impl Sink for AsyncSink {
    fn write(&self, level: EmitLevel, text: &str) -> io::Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }
        self.send(WriterMessage::Write(level, text.to_owned()))
    }

    fn flush(&self) -> io::Result<()> {
        let (ack_sender, ack_receiver) = crossbeam_channel::bounded(1);
        self.send(WriterMessage::Flush(ack_sender))?;
        ack_receiver.recv().map_err(|_| {
            io::Error::new(io::ErrorKind::BrokenPipe, "writer thread has terminated")
        })?
    }

    fn set_minimum_level(&self, level: EmitLevel) {
        self.inner.set_minimum_level(level);
    }

    fn minimum_level(&self) -> EmitLevel {
        self.inner.minimum_level()
    }
}

impl fmt::Debug for AsyncSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncSink")
            .field("capacity", &self.capacity)
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

impl Drop for AsyncSink {
    fn drop(&mut self) {
        let _ = self.sender.send(WriterMessage::Shutdown);

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Main loop for the writer thread.
///
/// Write failures are held until the next flush request so the caller that
/// asked for durability sees them.
fn writer_thread_main(receiver: &Receiver<WriterMessage>, sink: &dyn Sink) {
    let mut deferred: Option<io::Error> = None;

    for message in receiver {
        match message {
            WriterMessage::Write(level, text) => {
                if let Err(error) = sink.write(level, &text) {
                    deferred.get_or_insert(error);
                }
            }
            WriterMessage::Flush(ack) => {
                let result = match deferred.take() {
                    Some(error) => Err(error),
                    None => sink.flush(),
                };
                let _ = ack.send(result);
            }
            WriterMessage::Shutdown => break,
        }
    }

    let _ = sink.flush();
}
