//! crates/logging/src/context.rs
//! Per-thread report state.
//!
//! An [`ExecutionContext`] owns everything a thread of model code needs to
//! report without locking: the active configuration, the compiled filter,
//! the resolution cache, the action table and the dispatch latches. Sinks
//! and the known-parameter registry come from the shared [`ReportRuntime`].

use std::fmt;
use std::io;
use std::sync::Arc;

use regex::{Regex, RegexBuilder};

use crate::cache::ResolutionCache;
use crate::clock::{IdleClock, SimulationClock};
use crate::compose::MessageComposer;
use crate::config::LogConfig;
use crate::dispatch::{ActionDispatcher, ActionTable, Actions, Outputs};
use crate::error::{ReportError, ReportResult};
use crate::level::{Severity, VerbosityLevel};
use crate::provider::ConfigProvider;
use crate::record::{LogRecord, LogSource};
use crate::resolver::VerbosityResolver;
use crate::runtime::{ReportRuntime, SinkSet};
use crate::time::TimeResolution;

/// Report state of one thread of model code.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use logging::{
///     ExecutionContext, FixedSinks, LogConfig, LogSource, MapProvider, ReportRuntime,
///     VerbosityLevel,
/// };
/// use logging_sink::{MessageSink, SharedSink};
///
/// let memory = Arc::new(MessageSink::memory());
/// let display: SharedSink = memory.clone();
/// let runtime = Arc::new(ReportRuntime::with_factory(FixedSinks::new(display, None)));
/// let provider = Arc::new(MapProvider::new().with_value("top.cpu.log_level", 5));
///
/// let mut context = ExecutionContext::new(runtime).with_provider(provider);
/// context.init_logging_with(
///     LogConfig::new()
///         .print_sim_time(false)
///         .msg_type_field_width(8)
///         .file_info_from(None),
/// )?;
///
/// let cpu = LogSource::new("top.cpu");
/// assert_eq!(context.verbosity(&cpu), VerbosityLevel::Debug);
/// logging::report_debug!(context, &cpu, "fetch {:#x}", 0x40)?;
/// assert_eq!(memory.lines(), vec!["top.cpu : fetch 0x40"]);
/// # Ok::<(), logging::ReportError>(())
/// ```
pub struct ExecutionContext {
    runtime: Arc<ReportRuntime>,
    provider: Option<Arc<dyn ConfigProvider>>,
    clock: Arc<dyn SimulationClock>,
    config: LogConfig,
    filter: Option<Regex>,
    resolution: TimeResolution,
    cycle_base: u64,
    sinks: Option<SinkSet>,
    cache: ResolutionCache,
    dispatcher: ActionDispatcher,
    actions: ActionTable,
}

impl ExecutionContext {
    /// Uninitialized context bound to `runtime`, with no provider and an idle clock.
    #[must_use]
    pub fn new(runtime: Arc<ReportRuntime>) -> Self {
        Self {
            runtime,
            provider: None,
            clock: Arc::new(IdleClock),
            config: LogConfig::default(),
            filter: None,
            resolution: TimeResolution::default(),
            cycle_base: 0,
            sinks: None,
            cache: ResolutionCache::new(),
            dispatcher: ActionDispatcher::new(),
            actions: ActionTable::DEFAULT,
        }
    }

    /// Consults `provider` for configured levels.
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn ConfigProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Reads simulated time from `clock`.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn SimulationClock>) -> Self {
        self.clock = clock;
        self
    }

    /// Interprets time stamps with `resolution`.
    #[must_use]
    pub fn with_resolution(mut self, resolution: TimeResolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Initializes logging with the default configuration adjusted by the
    /// three classic knobs.
    ///
    /// # Errors
    ///
    /// See [`init_logging_with`](Self::init_logging_with).
    pub fn init_logging(
        &mut self,
        level: VerbosityLevel,
        type_field_width: u32,
        print_time: bool,
    ) -> ReportResult<()> {
        let config = self
            .config
            .clone()
            .level(level)
            .msg_type_field_width(type_field_width)
            .print_sys_time(print_time);
        self.init_logging_with(config)
    }

    /// Replaces the configuration and binds the shared sinks.
    ///
    /// The action table is reset to [`ActionTable::DEFAULT`]. Cached
    /// thresholds are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidFilter`] when `log_filter_regex` does not
    /// compile and [`ReportError::Sink`] when the sinks cannot be created. On
    /// error the context keeps its previous configuration.
    pub fn init_logging_with(&mut self, config: LogConfig) -> ReportResult<()> {
        let filter = if config.log_filter_regex.is_empty() {
            None
        } else {
            let compiled = RegexBuilder::new(&config.log_filter_regex)
                .case_insensitive(true)
                .build()
                .map_err(|source| ReportError::InvalidFilter {
                    pattern: config.log_filter_regex.clone(),
                    source,
                })?;
            Some(compiled)
        };
        let sinks = self.runtime.bind_sinks(&config)?;

        tracing::debug!(
            level = %config.level,
            filter = filter.is_some(),
            persist = sinks.persist.is_some(),
            "initialized report context"
        );
        self.config = config;
        self.filter = filter;
        self.sinks = Some(sinks);
        self.actions = ActionTable::DEFAULT;
        Ok(())
    }

    /// Sets the default threshold and forgets every cached threshold.
    pub fn reinit_logging(&mut self, level: VerbosityLevel) {
        self.config.level = level;
        self.cache.clear();
    }

    /// Sets the default threshold and the console sink's minimum level.
    ///
    /// Thresholds already cached for sources are not recomputed.
    pub fn set_logging_level(&mut self, level: VerbosityLevel) {
        self.config.level = level;
        if let Some(sinks) = &self.sinks {
            sinks.display.set_minimum_level(level.minimum_emit_level());
        }
    }

    /// Default threshold.
    #[must_use]
    pub const fn logging_level(&self) -> VerbosityLevel {
        self.config.level
    }

    /// Prints time stamps as cycles of `ticks`; zero prints formatted time.
    pub fn set_cycle_base(&mut self, ticks: u64) {
        self.cycle_base = ticks;
    }

    /// Ticks per printed cycle.
    #[must_use]
    pub const fn cycle_base(&self) -> u64 {
        self.cycle_base
    }

    /// Parameter names that may configure a level, across every context of the runtime.
    #[must_use]
    pub fn logging_parameters(&self) -> Vec<String> {
        self.runtime.parameters().names()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Reports whether this context has bound its sinks.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.sinks.is_some()
    }

    /// Shared runtime.
    #[must_use]
    pub const fn runtime(&self) -> &Arc<ReportRuntime> {
        &self.runtime
    }

    /// Replaces the actions for `severity`, returning the previous ones.
    pub fn set_actions(&mut self, severity: Severity, actions: Actions) -> Actions {
        self.actions.set(severity, actions)
    }

    /// Actions registered for `severity`.
    #[must_use]
    pub const fn actions(&self, severity: Severity) -> Actions {
        self.actions.get(severity)
    }

    /// Whether a report has already requested a simulation stop.
    #[must_use]
    pub const fn halt_requested(&self) -> bool {
        self.dispatcher.halt_requested()
    }

    /// Error reports dispatched so far.
    #[must_use]
    pub const fn errors_seen(&self) -> u64 {
        self.dispatcher.errors_seen()
    }

    /// Resolution cache, for inspection.
    #[must_use]
    pub const fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Flushes the bound sinks.
    pub fn flush(&self) -> io::Result<()> {
        self.sinks.as_ref().map_or(Ok(()), SinkSet::flush)
    }

    /// Effective threshold of `source`, resolved once and then served from the cache.
    pub fn verbosity(&mut self, source: &LogSource) -> VerbosityLevel {
        let known = self.runtime.parameters();
        let provider = self.provider.as_deref();
        let default = self.config.level;
        self.cache.get_or_resolve(source, |source| {
            VerbosityResolver::new(known, default)
                .with_provider(provider)
                .resolve(source)
        })
    }

    /// Reports whether `source` emits records at `level`.
    pub fn enabled(&mut self, source: &LogSource, level: VerbosityLevel) -> bool {
        self.verbosity(source).admits(level)
    }

    /// Reports `record` when `source`'s threshold admits it.
    ///
    /// # Errors
    ///
    /// See [`report`](Self::report).
    pub fn log(&mut self, source: &LogSource, record: LogRecord) -> ReportResult<()> {
        if self.enabled(source, record.level()) {
            self.report(record)
        } else {
            Ok(())
        }
    }

    /// Stamps `record` with the current time and applies its severity's actions.
    ///
    /// No threshold is checked here.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NotInitialized`] before
    /// [`init_logging_with`](Self::init_logging_with) succeeded, and
    /// [`ReportError::Escalated`] when the actions escalate the report.
    pub fn report(&mut self, record: LogRecord) -> ReportResult<()> {
        let Some(sinks) = self.sinks.as_ref() else {
            return Err(ReportError::NotInitialized);
        };
        let clock = self.clock.as_ref();
        let record = record.stamped(clock.current_time(), clock.delta_count());
        let composer = MessageComposer::new(&self.config)
            .with_filter(self.filter.as_ref())
            .with_resolution(self.resolution)
            .with_cycle_base(self.cycle_base)
            .with_clock_running(clock.is_running());
        let outputs = Outputs {
            display: sinks.display.as_ref(),
            persist: sinks.persist.as_deref(),
        };
        let actions = self.actions.get(record.severity());
        self.dispatcher
            .dispatch(&record, actions, &composer, outputs, clock)
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("config", &self.config)
            .field("provider", &self.provider.is_some())
            .field("cycle_base", &self.cycle_base)
            .field("sinks", &self.sinks)
            .field("cached", &self.cache.len())
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}
