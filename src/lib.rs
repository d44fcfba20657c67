#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `simreport` bundles the workspace crates behind one dependency:
//!
//! - [`logging`] resolves per-component verbosity, composes report lines and
//!   applies the action policy of each severity;
//! - [`logging_sink`] writes composed lines to the console, a file, memory or
//!   a background writer thread;
//! - [`channel`] hands typed transactions between model components.
//!
//! Most models only need the [`prelude`].
//!
//! # Examples
//!
//! A component resolves its threshold once and then reports through the
//! context it runs in:
//!
//! ```
//! use std::sync::Arc;
//! use simreport::prelude::*;
//!
//! let memory = Arc::new(MessageSink::memory());
//! let runtime = ReportRuntime::with_factory(FixedSinks::new(memory.clone(), None));
//! let provider = MapProvider::new().with_value("top.capture.log_level", 5);
//! let mut context = ExecutionContext::new(Arc::new(runtime)).with_provider(Arc::new(provider));
//! context.init_logging_with(
//!     LogConfig::new()
//!         .msg_type_field_width(0)
//!         .print_sim_time(false)
//!         .file_info_from(None),
//! )?;
//!
//! let capture = LogSource::new("top.capture");
//! simreport::report_debug!(context, &capture, "armed")?;
//! simreport::report_trace!(context, &capture, "not shown")?;
//! assert_eq!(memory.lines(), vec!["armed"]);
//! # Ok::<(), ReportError>(())
//! ```

pub use channel;
pub use logging;
pub use logging_sink;

pub use logging::{
    report, report_debug, report_error, report_fatal, report_info, report_trace, report_warning,
};

/// Types a model component typically needs.
pub mod prelude {
    pub use channel::{
        BoundedChannel, Channel, ChannelError, ChannelGet, ChannelPut, ScriptedChannel,
    };
    pub use logging::{
        Actions, ExecutionContext, FixedSinks, IdleClock, LogConfig, LogRecord, LogSource,
        ManualClock, MapProvider, ReportError, ReportResult, ReportRuntime, Severity,
        SimulationClock, StandardSinks, VerbosityLevel,
    };
    pub use logging_sink::{EmitLevel, MessageSink, SharedSink, Sink};
}
