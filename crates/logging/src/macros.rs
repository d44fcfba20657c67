//! crates/logging/src/macros.rs
//! Reporting macros.
//!
//! Each macro checks the source's cached threshold before formatting, so a
//! disabled report costs one hash lookup. Enabled reports carry the calling
//! file and line. The macros evaluate to a
//! [`ReportResult<()>`](crate::ReportResult).

/// Reports a formatted message at an explicit level.
///
/// The context expression is evaluated twice; pass a place such as a local
/// variable.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use logging::{ExecutionContext, FixedSinks, LogConfig, LogSource, ReportRuntime, VerbosityLevel};
/// use logging_sink::{MessageSink, SharedSink};
///
/// let memory = Arc::new(MessageSink::memory());
/// let display: SharedSink = memory.clone();
/// let runtime = Arc::new(ReportRuntime::with_factory(FixedSinks::new(display, None)));
/// let mut context = ExecutionContext::new(runtime);
/// context.init_logging_with(
///     LogConfig::new().print_sim_time(false).msg_type_field_width(0).file_info_from(None),
/// )?;
///
/// let bus = LogSource::new("top.bus");
/// logging::report!(context, &bus, VerbosityLevel::Warning, "{} retries", 3)?;
/// logging::report!(context, &bus, VerbosityLevel::Debug, "not shown")?;
/// assert_eq!(memory.lines(), vec!["3 retries"]);
/// # Ok::<(), logging::ReportError>(())
/// ```
#[macro_export]
macro_rules! report {
    ($ctx:expr, $source:expr, $level:expr, $($arg:tt)+) => {{
        let source: &$crate::LogSource = $source;
        let level: $crate::VerbosityLevel = $level;
        if $ctx.enabled(source, level) {
            $ctx.report(
                $crate::LogRecord::new(level, source.lookup_name(), ::std::format!($($arg)+))
                    .with_location(::std::file!(), ::std::line!()),
            )
        } else {
            ::std::result::Result::<(), $crate::ReportError>::Ok(())
        }
    }};
}

/// Reports at [`VerbosityLevel::Fatal`](crate::VerbosityLevel::Fatal).
///
/// With the default action table this aborts the process.
#[macro_export]
macro_rules! report_fatal {
    ($ctx:expr, $source:expr, $($arg:tt)+) => {
        $crate::report!($ctx, $source, $crate::VerbosityLevel::Fatal, $($arg)+)
    };
}

/// Reports at [`VerbosityLevel::Error`](crate::VerbosityLevel::Error).
///
/// With the default action table the report comes back as
/// [`ReportError::Escalated`](crate::ReportError::Escalated).
#[macro_export]
macro_rules! report_error {
    ($ctx:expr, $source:expr, $($arg:tt)+) => {
        $crate::report!($ctx, $source, $crate::VerbosityLevel::Error, $($arg)+)
    };
}

/// Reports at [`VerbosityLevel::Warning`](crate::VerbosityLevel::Warning).
#[macro_export]
macro_rules! report_warning {
    ($ctx:expr, $source:expr, $($arg:tt)+) => {
        $crate::report!($ctx, $source, $crate::VerbosityLevel::Warning, $($arg)+)
    };
}

/// Reports at [`VerbosityLevel::Info`](crate::VerbosityLevel::Info).
#[macro_export]
macro_rules! report_info {
    ($ctx:expr, $source:expr, $($arg:tt)+) => {
        $crate::report!($ctx, $source, $crate::VerbosityLevel::Info, $($arg)+)
    };
}

/// Reports at [`VerbosityLevel::Debug`](crate::VerbosityLevel::Debug).
#[macro_export]
macro_rules! report_debug {
    ($ctx:expr, $source:expr, $($arg:tt)+) => {
        $crate::report!($ctx, $source, $crate::VerbosityLevel::Debug, $($arg)+)
    };
}

/// Reports at [`VerbosityLevel::Trace`](crate::VerbosityLevel::Trace).
#[macro_export]
macro_rules! report_trace {
    ($ctx:expr, $source:expr, $($arg:tt)+) => {
        $crate::report!($ctx, $source, $crate::VerbosityLevel::Trace, $($arg)+)
    };
}
