#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` decides whether a report from a simulation model is emitted,
//! renders it, and applies the side effects registered for its severity.
//! Model components identify themselves with a [`LogSource`]: a
//! hierarchical instance path such as `top.cpu.fetch`, optional feature
//! aliases and a type name.
//!
//! # Design
//!
//! - [`VerbosityResolver`] expands a source into candidate configuration keys
//!   (`top.cpu.fetch`, `*.fetch`, `top.cpu`, ..., `*`, the root key) and asks
//!   a [`ConfigProvider`] for the most specific one that is set.
//! - [`ResolutionCache`] remembers the result per source so the provider is
//!   queried once per source and context.
//! - [`MessageComposer`] renders a [`LogRecord`] with time, type column, file
//!   and process details.
//! - [`ActionDispatcher`] writes to the display and persist sinks and applies
//!   halt, abort and escalate [`Actions`].
//! - [`ExecutionContext`] ties these together for one thread; the shared
//!   [`ReportRuntime`] owns the sinks every context writes to.
//!
//! # Invariants
//!
//! - The most specific configured key wins; specificity is the number of `.`
//!   separators in the key.
//! - A cached threshold is served without querying the provider until
//!   [`ExecutionContext::reinit_logging`] clears the cache.
//! - A context requests a simulation stop at most once.
//! - [`Actions::SUPPRESS`] overrides every other action.
//!
//! # Errors
//!
//! Fallible operations return [`ReportError`]. Provider failures are not
//! errors: the resolver falls back to the configured default level.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use logging::{ExecutionContext, FixedSinks, LogConfig, LogSource, ReportRuntime};
//! use logging_sink::{MessageSink, SharedSink};
//!
//! let memory = Arc::new(MessageSink::memory());
//! let display: SharedSink = memory.clone();
//! let runtime = Arc::new(ReportRuntime::with_factory(FixedSinks::new(display, None)));
//!
//! let mut context = ExecutionContext::new(runtime);
//! context.init_logging_with(
//!     LogConfig::new().msg_type_field_width(10).print_sim_time(false),
//! )?;
//! logging::report_warning!(context, &LogSource::new("clk"), "drift")?;
//! assert_eq!(memory.lines()[0], "clk       : drift");
//! # Ok::<(), logging::ReportError>(())
//! ```

mod cache;
mod clock;
mod compose;
mod config;
mod context;
mod dispatch;
mod error;
mod level;
mod macros;
mod padding;
mod provider;
mod record;
mod resolver;
mod runtime;
mod time;

pub use cache::{ResolutionCache, source_hash};
pub use clock::{IdleClock, ManualClock, SimulationClock};
pub use compose::MessageComposer;
pub use config::{DEFAULT_TYPE_FIELD_WIDTH, LogConfig, UNPADDED_TYPE_FIELD};
pub use context::ExecutionContext;
pub use dispatch::{ActionDispatcher, ActionTable, Actions, Outputs};
pub use error::{EscalatedReport, ReportError, ReportResult};
pub use level::{ParseLevelError, Severity, Verbosity, VerbosityLevel};
pub use padding::{MIN_ELLIPSIS_WIDTH, padded};
pub use provider::{
    ConfigProvider, LOG_LEVEL_PARAM, MapProvider, ProviderError, lookup_level, parameter_name,
};
pub use record::{LogRecord, LogSource, SourceLocation};
pub use resolver::{CandidateKey, VerbosityResolver, candidate_keys};
pub use runtime::{
    FixedSinks, KnownParameters, ReportRuntime, SinkFactory, SinkSet, StandardSinks,
};
pub use time::{DisplayTime, TimeResolution, TimeUnit, format_time};
