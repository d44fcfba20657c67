//! Integration tests for report dispatch through an execution context.
//!
//! These tests verify the action policy end to end: display and persist
//! routing, report-only-first-error gating, halt idempotence, escalation,
//! abort and the flush performed once simulation has stopped.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use logging::{
    Actions, ExecutionContext, FixedSinks, LogConfig, LogRecord, LogSource, ManualClock,
    ReportError, ReportRuntime, Severity, SimulationClock, UNPADDED_TYPE_FIELD, VerbosityLevel,
};
use logging_sink::{EmitLevel, MessageSink, SharedSink, Sink};

type Memory = Arc<MessageSink<Vec<u8>>>;

fn quiet() -> LogConfig {
    LogConfig::new()
        .level(VerbosityLevel::None)
        .print_sim_time(false)
        .msg_type_field_width(0)
        .file_info_from(None)
        .log_async(false)
}

fn display_only() -> (Memory, ExecutionContext) {
    let display = Arc::new(MessageSink::memory());
    let runtime = ReportRuntime::with_factory(FixedSinks::new(display.clone(), None));
    (display, ExecutionContext::new(Arc::new(runtime)))
}

fn display_and_persist() -> (Memory, Memory, ExecutionContext) {
    let display = Arc::new(MessageSink::memory());
    let persist = Arc::new(MessageSink::memory());
    let runtime = ReportRuntime::with_factory(FixedSinks::new(
        display.clone(),
        Some(persist.clone() as SharedSink),
    ));
    (display, persist, ExecutionContext::new(Arc::new(runtime)))
}

/// Sink counting explicit flushes.
#[derive(Default)]
struct FlushCounter {
    flushes: AtomicUsize,
}

impl Sink for FlushCounter {
    fn write(&self, _level: EmitLevel, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn set_minimum_level(&self, _level: EmitLevel) {}

    fn minimum_level(&self) -> EmitLevel {
        EmitLevel::Trace
    }
}

/// Clock whose abort unwinds instead of terminating the test process.
struct PanickingClock;

impl SimulationClock for PanickingClock {
    fn current_time(&self) -> u64 {
        0
    }

    fn is_running(&self) -> bool {
        true
    }

    fn delta_count(&self) -> u64 {
        0
    }

    fn request_stop(&self) {}

    fn abort(&self) -> ! {
        panic!("abort requested");
    }
}

// ============================================================================
// Display and Persist Routing
// ============================================================================

/// Verifies the classic end-to-end rendering of a warning.
#[test]
fn warning_renders_with_padded_type() {
    let (display, mut context) = display_only();
    context
        .init_logging_with(
            LogConfig::new()
                .msg_type_field_width(10)
                .print_sim_time(false)
                .file_info_from(None),
        )
        .unwrap();
    logging::report_warning!(context, &LogSource::new("clk"), "drift").unwrap();
    assert_eq!(display.lines(), vec!["clk       : drift"]);
}

/// Verifies high-verbosity records skip the display when a persist sink exists.
#[test]
fn high_verbosity_records_are_only_persisted() {
    let (display, persist, mut context) = display_and_persist();
    context
        .init_logging_with(quiet().log_file_name("run.log"))
        .unwrap();

    context
        .report(LogRecord::new(VerbosityLevel::Debug, "top.cpu", "detail"))
        .unwrap();
    context
        .report(LogRecord::new(VerbosityLevel::Info, "top.cpu", "summary"))
        .unwrap();

    assert_eq!(display.lines(), vec!["summary"]);
    let persisted = persist.lines();
    assert_eq!(persisted.len(), 2);
    assert_eq!(
        persisted[0],
        format!("[{:>20}]{:<24}: detail", "0 s", "top.cpu")
    );
}

/// Verifies high-verbosity records reach the display when nothing is persisted.
#[test]
fn high_verbosity_records_are_displayed_without_persist_sink() {
    let (display, persist, mut context) = display_and_persist();
    context.init_logging_with(quiet()).unwrap();
    context
        .report(LogRecord::new(VerbosityLevel::Trace, "t", "fine grained"))
        .unwrap();
    assert_eq!(display.lines(), vec!["fine grained"]);
    assert!(persist.lines().is_empty());
}

/// Verifies the persist sink keeps the configured type width when set.
#[test]
fn persist_keeps_configured_type_width() {
    let (_display, persist, mut context) = display_and_persist();
    context
        .init_logging_with(quiet().msg_type_field_width(8).log_file_name("run.log"))
        .unwrap();
    context
        .report(LogRecord::new(VerbosityLevel::Warning, "bus", "late"))
        .unwrap();
    assert_eq!(
        persist.lines(),
        vec![format!("[{:>20}]bus     : late", "0 s")]
    );
}

/// Verifies actions can be replaced per severity and suppression wins.
#[test]
fn suppressed_severity_writes_nothing() {
    let (display, mut context) = display_only();
    context.init_logging_with(quiet()).unwrap();
    let previous = context.set_actions(Severity::Warning, Actions::SUPPRESS | Actions::DISPLAY);
    assert_eq!(previous, Actions::DISPLAY | Actions::PERSIST);

    context
        .report(LogRecord::new(VerbosityLevel::Warning, "t", "quiet"))
        .unwrap();
    assert!(display.lines().is_empty());
}

/// Verifies re-initialization restores the default action table.
#[test]
fn init_resets_action_table() {
    let (_display, mut context) = display_only();
    context.init_logging_with(quiet()).unwrap();
    context.set_actions(Severity::Info, Actions::NONE);
    context.init_logging_with(quiet()).unwrap();
    assert_eq!(
        context.actions(Severity::Info),
        Actions::DISPLAY | Actions::PERSIST
    );
}

// ============================================================================
// Error Gating
// ============================================================================

/// Verifies the third and later errors are hidden when `report_only_first_error` is set.
#[test]
fn report_only_first_error_hides_later_reports() {
    let (display, mut context) = display_only();
    context
        .init_logging_with(quiet().report_only_first_error(true))
        .unwrap();
    context.set_actions(Severity::Error, Actions::DISPLAY);

    for message in ["first", "second", "third"] {
        context
            .report(LogRecord::new(VerbosityLevel::Error, "t", message))
            .unwrap();
    }
    context
        .report(LogRecord::new(VerbosityLevel::Warning, "t", "warning"))
        .unwrap();
    context
        .report(LogRecord::new(VerbosityLevel::Info, "t", "info"))
        .unwrap();

    assert_eq!(display.lines(), vec!["first", "second", "info"]);
    assert_eq!(context.errors_seen(), 3);
}

/// Verifies the gate counts errors before the current one: the second error passes.
#[test]
fn report_only_first_error_still_shows_second_error() {
    let (display, mut context) = display_only();
    context
        .init_logging_with(quiet().report_only_first_error(true))
        .unwrap();
    context.set_actions(Severity::Error, Actions::DISPLAY);

    for message in ["first", "second"] {
        context
            .report(LogRecord::new(VerbosityLevel::Error, "t", message))
            .unwrap();
    }
    context
        .report(LogRecord::new(VerbosityLevel::Warning, "t", "warning"))
        .unwrap();

    assert_eq!(display.lines(), vec!["first", "second"]);
    assert_eq!(context.errors_seen(), 2);
}

/// Verifies every error is shown by default.
#[test]
fn all_errors_shown_by_default() {
    let (display, mut context) = display_only();
    context.init_logging_with(quiet()).unwrap();
    context.set_actions(Severity::Error, Actions::DISPLAY);
    for message in ["first", "second", "third"] {
        context
            .report(LogRecord::new(VerbosityLevel::Error, "t", message))
            .unwrap();
    }
    assert_eq!(display.lines(), vec!["first", "second", "third"]);
}

// ============================================================================
// Halt, Escalate and Abort
// ============================================================================

/// Verifies a running simulation is asked to stop exactly once.
#[test]
fn halt_requests_stop_once_per_context() {
    let clock = Arc::new(ManualClock::new());
    clock.set_running(true);
    let (display, mut context) = display_only();
    context = context.with_clock(clock.clone());
    context.init_logging_with(quiet()).unwrap();
    context.set_actions(Severity::Warning, Actions::DISPLAY | Actions::HALT);

    for _ in 0..3 {
        context
            .report(LogRecord::new(VerbosityLevel::Warning, "t", "stop"))
            .unwrap();
    }

    assert_eq!(clock.stop_requests(), 1);
    assert!(context.halt_requested());
    assert_eq!(display.lines().len(), 3);
}

/// Verifies errors escalate by default and carry their origin.
#[test]
fn error_macro_escalates() {
    let (display, mut context) = display_only();
    context
        .init_logging_with(
            LogConfig::new()
                .level(VerbosityLevel::None)
                .print_sim_time(false)
                .msg_type_field_width(UNPADDED_TYPE_FIELD),
        )
        .unwrap();
    context.reinit_logging(VerbosityLevel::Error);

    let source = LogSource::new("top.bus");
    let error = logging::report_error!(context, &source, "parity {}", "mismatch").unwrap_err();
    let ReportError::Escalated(report) = &error else {
        panic!("expected escalation, got {error:?}");
    };
    assert_eq!(report.severity(), Severity::Error);
    assert_eq!(report.msg_type(), "top.bus");
    assert_eq!(report.message(), "parity mismatch");
    assert!(report.file().is_some_and(|file| file.ends_with("report_dispatch.rs")));
    assert!(report.line().is_some());
    assert!(report.composed().starts_with("top.bus: parity mismatch\n         [FILE:"));
    assert!(error.to_string().contains("parity mismatch"));
    assert_eq!(display.lines()[0], "top.bus: parity mismatch");
}

/// Verifies escalation still happens when the filter hides the text.
#[test]
fn escalation_falls_back_to_message_when_suppressed() {
    let (display, mut context) = display_only();
    context
        .init_logging_with(quiet().log_filter_regex("^nothing$"))
        .unwrap();
    context.set_actions(Severity::Info, Actions::DISPLAY | Actions::ESCALATE);

    let error = context
        .report(LogRecord::new(VerbosityLevel::Debug, "top.cpu", "hidden"))
        .unwrap_err();
    assert_eq!(error.as_escalated().unwrap().composed(), "hidden");
    assert!(display.lines().is_empty());
}

/// Verifies fatal reports abort through the clock.
#[test]
#[should_panic(expected = "abort requested")]
fn fatal_report_aborts() {
    let (_display, mut context) = display_only();
    context = context.with_clock(Arc::new(PanickingClock));
    context.init_logging_with(quiet()).unwrap();
    let _ = context.report(LogRecord::new(VerbosityLevel::Fatal, "t", "dead"));
}

// ============================================================================
// Flushing
// ============================================================================

/// Verifies sinks are flushed once time has advanced and the scheduler stopped.
#[test]
fn sinks_flush_after_simulation_stops() {
    let counter = Arc::new(FlushCounter::default());
    let runtime = ReportRuntime::with_factory(FixedSinks::new(counter.clone(), None));
    let clock = Arc::new(ManualClock::new());
    let mut context = ExecutionContext::new(Arc::new(runtime)).with_clock(clock.clone());
    context.init_logging_with(quiet()).unwrap();

    let record = || LogRecord::new(VerbosityLevel::Warning, "t", "m");

    context.report(record()).unwrap();
    assert_eq!(counter.flushes.load(Ordering::SeqCst), 0, "time zero");

    clock.set_time(100);
    clock.set_running(true);
    context.report(record()).unwrap();
    assert_eq!(counter.flushes.load(Ordering::SeqCst), 0, "running");

    clock.set_running(false);
    context.report(record()).unwrap();
    assert_eq!(counter.flushes.load(Ordering::SeqCst), 1, "stopped");
}

// ============================================================================
// Runtime Sharing
// ============================================================================

/// Verifies contexts of one runtime write to the same sinks.
#[test]
fn contexts_share_runtime_sinks() {
    let display = Arc::new(MessageSink::memory());
    let runtime = Arc::new(ReportRuntime::with_factory(FixedSinks::new(
        display.clone(),
        None,
    )));
    let mut first = ExecutionContext::new(Arc::clone(&runtime));
    let mut second = ExecutionContext::new(runtime);
    first.init_logging_with(quiet()).unwrap();
    second.init_logging_with(quiet()).unwrap();

    first
        .report(LogRecord::new(VerbosityLevel::Warning, "a", "one"))
        .unwrap();
    second
        .report(LogRecord::new(VerbosityLevel::Warning, "b", "two"))
        .unwrap();
    assert_eq!(display.lines(), vec!["one", "two"]);
}

/// Verifies `set_logging_level` narrows the shared console sink.
#[test]
fn set_logging_level_filters_console_output() {
    let (display, mut context) = display_only();
    context.init_logging_with(quiet()).unwrap();
    context.set_logging_level(VerbosityLevel::Warning);

    context
        .report(LogRecord::new(VerbosityLevel::Info, "t", "dropped"))
        .unwrap();
    context
        .report(LogRecord::new(VerbosityLevel::Warning, "t", "kept"))
        .unwrap();
    assert_eq!(display.lines(), vec!["kept"]);
    assert_eq!(context.logging_level(), VerbosityLevel::Warning);
}
