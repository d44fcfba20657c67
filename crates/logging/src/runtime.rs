//! crates/logging/src/runtime.rs
//! Process-scoped report state shared by every execution context.
//!
//! The runtime owns the sinks and the registry of known parameter names. The
//! first context that initializes logging creates the sinks; contexts that
//! initialize later bind to the same sinks. Share one runtime between
//! contexts with an [`Arc`].

use std::fmt;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashSet;
use logging_sink::{AsyncSink, MessageSink, SharedSink, SinkLayout};

use crate::config::LogConfig;
use crate::error::ReportError;

/// Concurrent, append-only set of parameter names that may configure levels.
#[derive(Debug, Default)]
pub struct KnownParameters {
    names: DashSet<String>,
}

impl KnownParameters {
    /// Records `name`; returns whether it was new.
    pub fn insert(&self, name: String) -> bool {
        self.names.insert(name)
    }

    /// Reports whether `name` has been recorded.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of recorded names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Reports whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Recorded names in lexicographic order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.iter().map(|name| name.key().clone()).collect();
        names.sort_unstable();
        names
    }
}

/// Sinks a context writes to.
#[derive(Clone)]
pub struct SinkSet {
    /// Console-style sink receiving displayed reports.
    pub display: SharedSink,
    /// File-style sink receiving persisted reports, if configured.
    pub persist: Option<SharedSink>,
}

impl SinkSet {
    /// Flushes both sinks, returning the first failure.
    pub fn flush(&self) -> io::Result<()> {
        let display = self.display.flush();
        let persist = self.persist.as_ref().map_or(Ok(()), |sink| sink.flush());
        display.and(persist)
    }
}

impl fmt::Debug for SinkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkSet")
            .field("display_minimum", &self.display.minimum_level())
            .field("persist", &self.persist.is_some())
            .finish()
    }
}

/// Creates the sinks for the first initializing context.
pub trait SinkFactory: Send + Sync {
    /// Builds the display and persist sinks for `config`.
    fn create(&self, config: &LogConfig) -> io::Result<SinkSet>;
}

/// Console on standard output plus an optional truncated log file.
///
/// Both sinks start fully open; the context narrows the console through
/// `set_logging_level`. Both sinks are wrapped in an [`AsyncSink`] when `log_async` is set.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardSinks;

impl StandardSinks {
    fn finish<W>(sink: MessageSink<W>, asynchronous: bool) -> io::Result<SharedSink>
    where
        W: io::Write + Send + 'static,
    {
        let sink: SharedSink = Arc::new(sink);
        if asynchronous {
            Ok(Arc::new(AsyncSink::new(sink)?))
        } else {
            Ok(sink)
        }
    }
}

impl SinkFactory for StandardSinks {
    fn create(&self, config: &LogConfig) -> io::Result<SinkSet> {
        let console = MessageSink::stdout()
            .with_layout(SinkLayout::console(config.print_severity, config.colored_output));
        let display = Self::finish(console, config.log_async)?;

        let persist = if config.log_file_name.is_empty() {
            None
        } else {
            let file = MessageSink::create(&config.log_file_name)?
                .with_layout(SinkLayout::file(config.print_severity));
            Some(Self::finish(file, config.log_async)?)
        };

        Ok(SinkSet { display, persist })
    }
}

/// Hands out caller-built sinks, for embedding and tests.
///
/// Like [`StandardSinks`], the persist sink is only used when the
/// configuration names a log file.
#[derive(Clone)]
pub struct FixedSinks {
    sinks: SinkSet,
}

impl FixedSinks {
    /// Uses `display` and the optional `persist` sink for every context.
    #[must_use]
    pub fn new(display: SharedSink, persist: Option<SharedSink>) -> Self {
        Self {
            sinks: SinkSet { display, persist },
        }
    }
}

impl SinkFactory for FixedSinks {
    fn create(&self, config: &LogConfig) -> io::Result<SinkSet> {
        let persist = if config.log_file_name.is_empty() {
            None
        } else {
            self.sinks.persist.clone()
        };
        Ok(SinkSet {
            display: Arc::clone(&self.sinks.display),
            persist,
        })
    }
}

/// Process-scoped state: the shared sinks and the known-parameter registry.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use logging::{ExecutionContext, FixedSinks, LogConfig, ReportRuntime};
/// use logging_sink::{MessageSink, SharedSink};
///
/// let memory = Arc::new(MessageSink::memory());
/// let display: SharedSink = memory.clone();
/// let runtime = Arc::new(ReportRuntime::with_factory(FixedSinks::new(display, None)));
///
/// let mut first = ExecutionContext::new(Arc::clone(&runtime));
/// first.init_logging_with(LogConfig::new().log_async(false))?;
/// let mut second = ExecutionContext::new(runtime);
/// second.init_logging_with(LogConfig::new())?;
/// assert!(first.is_initialized() && second.is_initialized());
/// # Ok::<(), logging::ReportError>(())
/// ```
pub struct ReportRuntime {
    sinks: Mutex<Option<SinkSet>>,
    parameters: KnownParameters,
    factory: Box<dyn SinkFactory>,
}

impl ReportRuntime {
    /// Runtime creating [`StandardSinks`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_factory(StandardSinks)
    }

    /// Runtime creating sinks through `factory`.
    #[must_use]
    pub fn with_factory(factory: impl SinkFactory + 'static) -> Self {
        Self {
            sinks: Mutex::new(None),
            parameters: KnownParameters::default(),
            factory: Box::new(factory),
        }
    }

    /// Returns the shared sinks, creating them on first use.
    ///
    /// Later callers receive the existing display sink, and the existing
    /// persist sink only when their own configuration names a log file.
    pub fn bind_sinks(&self, config: &LogConfig) -> Result<SinkSet, ReportError> {
        let mut guard = self.sinks.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = guard.as_ref() {
            let persist = if config.log_file_name.is_empty() {
                None
            } else {
                existing.persist.clone()
            };
            return Ok(SinkSet {
                display: Arc::clone(&existing.display),
                persist,
            });
        }

        let sinks = self.factory.create(config)?;
        tracing::debug!(
            persist = sinks.persist.is_some(),
            asynchronous = config.log_async,
            "created report sinks"
        );
        *guard = Some(sinks.clone());
        Ok(sinks)
    }

    /// Reports whether sinks have been created.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Known parameter registry.
    #[must_use]
    pub const fn parameters(&self) -> &KnownParameters {
        &self.parameters
    }

    /// Flushes the shared sinks, if created.
    pub fn flush(&self) -> io::Result<()> {
        let sinks = self
            .sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        sinks.map_or(Ok(()), |sinks| sinks.flush())
    }

    /// Releases the shared sinks after flushing them; the next initialization creates new ones.
    pub fn shutdown(&self) -> io::Result<()> {
        let sinks = self
            .sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        sinks.map_or(Ok(()), |sinks| sinks.flush())
    }
}

impl Default for ReportRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReportRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportRuntime")
            .field("initialized", &self.is_initialized())
            .field("parameters", &self.parameters.len())
            .finish_non_exhaustive()
    }
}
