//! crates/logging/src/dispatch.rs
//! Side effects of a report.
//!
//! Every severity maps to a set of [`Actions`] through the context's
//! [`ActionTable`]. The [`ActionDispatcher`] applies them in a fixed order:
//! display, persist, halt, abort, escalate. Halt, abort and escalate first
//! sleep for a delay proportional to the configured level so that
//! asynchronous sinks get a chance to drain. After the actions, both sinks
//! are flushed when simulated time has advanced but the scheduler is no
//! longer running.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::thread;
use std::time::Duration;

use logging_sink::Sink;

use crate::clock::SimulationClock;
use crate::compose::MessageComposer;
use crate::config::DEFAULT_TYPE_FIELD_WIDTH;
use crate::error::{EscalatedReport, ReportError};
use crate::level::{Severity, Verbosity};
use crate::record::{LogRecord, SourceLocation};

const HALT_DELAY_PER_LEVEL_MS: u64 = 10;
const ABORT_DELAY_PER_LEVEL_MS: u64 = 20;

/// Bitfield of the side effects a report triggers.
///
/// # Examples
///
/// ```
/// use logging::Actions;
///
/// let actions = Actions::DISPLAY | Actions::HALT;
/// assert!(actions.contains(Actions::HALT));
/// assert!(!actions.contains(Actions::PERSIST));
/// assert_eq!(actions.to_string(), "DISPLAY | HALT");
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct Actions {
    bits: u8,
}

impl Actions {
    const fn new(bits: u8) -> Self {
        Self { bits }
    }

    /// No action.
    pub const NONE: Self = Self::new(0);
    /// Write the report to the display sink.
    pub const DISPLAY: Self = Self::new(1 << 0);
    /// Write the report to the persist sink.
    pub const PERSIST: Self = Self::new(1 << 1);
    /// Ask the scheduler to stop.
    pub const HALT: Self = Self::new(1 << 2);
    /// Terminate the process.
    pub const ABORT: Self = Self::new(1 << 3);
    /// Return the report to the caller as an error.
    pub const ESCALATE: Self = Self::new(1 << 4);
    /// Ignore the report entirely; overrides every other action.
    pub const SUPPRESS: Self = Self::new(1 << 5);

    const NAMES: [(Self, &'static str); 6] = [
        (Self::DISPLAY, "DISPLAY"),
        (Self::PERSIST, "PERSIST"),
        (Self::HALT, "HALT"),
        (Self::ABORT, "ABORT"),
        (Self::ESCALATE, "ESCALATE"),
        (Self::SUPPRESS, "SUPPRESS"),
    ];

    /// Returns a bitfield built from raw `bits`.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self::new(bits)
    }

    /// Raw bit representation.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.bits
    }

    /// Returns `true` when no action is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Checks whether every action in `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Union of both operands.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self::new(self.bits | other.bits)
    }

    /// Actions in `self` but not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self::new(self.bits & !other.bits)
    }
}

impl BitOr for Actions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Actions {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl BitAnd for Actions {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self::new(self.bits & rhs.bits)
    }
}

impl fmt::Display for Actions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        let mut first = true;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Actions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Actions({self})")
    }
}

/// Actions registered per severity.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ActionTable {
    entries: [Actions; Severity::COUNT],
}

impl ActionTable {
    /// Display and persist everything; escalate errors; abort on fatal reports.
    pub const DEFAULT: Self = Self {
        entries: [
            Actions::DISPLAY.union(Actions::PERSIST),
            Actions::DISPLAY.union(Actions::PERSIST),
            Actions::DISPLAY
                .union(Actions::PERSIST)
                .union(Actions::ESCALATE),
            Actions::DISPLAY.union(Actions::PERSIST).union(Actions::ABORT),
        ],
    };

    /// Actions for `severity`.
    #[must_use]
    pub const fn get(&self, severity: Severity) -> Actions {
        self.entries[severity.index()]
    }

    /// Replaces the actions for `severity`, returning the previous ones.
    pub fn set(&mut self, severity: Severity, actions: Actions) -> Actions {
        std::mem::replace(&mut self.entries[severity.index()], actions)
    }
}

impl Default for ActionTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Sinks a single dispatch writes to.
#[derive(Clone, Copy)]
pub struct Outputs<'a> {
    /// Console-style sink.
    pub display: &'a dyn Sink,
    /// File-style sink, when configured.
    pub persist: Option<&'a dyn Sink>,
}

impl fmt::Debug for Outputs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Outputs")
            .field("persist", &self.persist.is_some())
            .finish_non_exhaustive()
    }
}

/// Applies actions for one execution context.
///
/// Holds the two per-context latches: whether a stop was already requested,
/// and how many error reports have been seen.
#[derive(Clone, Debug, Default)]
pub struct ActionDispatcher {
    halt_requested: bool,
    errors_seen: u64,
}

impl ActionDispatcher {
    /// Dispatcher with clear latches.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            halt_requested: false,
            errors_seen: 0,
        }
    }

    /// Whether a HALT action has requested a stop.
    #[must_use]
    pub const fn halt_requested(&self) -> bool {
        self.halt_requested
    }

    /// Error reports seen so far, including suppressed ones.
    #[must_use]
    pub const fn errors_seen(&self) -> u64 {
        self.errors_seen
    }

    /// Applies `actions` to `record`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Escalated`] when `actions` contains
    /// [`Actions::ESCALATE`]. Sink failures are logged through `tracing` and
    /// otherwise ignored.
    pub fn dispatch(
        &mut self,
        record: &LogRecord,
        actions: Actions,
        composer: &MessageComposer<'_>,
        outputs: Outputs<'_>,
        clock: &dyn SimulationClock,
    ) -> Result<(), ReportError> {
        let errors_before = self.errors_seen;
        if record.severity() == Severity::Error {
            self.errors_seen += 1;
        }
        if actions.contains(Actions::SUPPRESS) {
            return Ok(());
        }

        let config = composer.config();
        let delay_level = config.level.index() as u64;
        let mut displayed = String::new();

        let gate = record.severity() == Severity::Info
            || !config.report_only_first_error
            || errors_before < 2;
        if gate {
            if actions.contains(Actions::DISPLAY)
                && (outputs.persist.is_none() || record.verbosity() < Verbosity::High)
            {
                displayed = composer.compose(record);
                write_composed(outputs.display, record, &displayed);
            }
            if let Some(persist) = outputs.persist.filter(|_| actions.contains(Actions::PERSIST)) {
                let mut persist_config = config.clone().print_sim_time(true);
                if persist_config.msg_type_field_width == 0 {
                    persist_config.msg_type_field_width = DEFAULT_TYPE_FIELD_WIDTH;
                }
                let text = composer.with_config(&persist_config).compose(record);
                write_composed(persist, record, &text);
            }
        }

        if actions.contains(Actions::HALT) {
            pause(delay_level * HALT_DELAY_PER_LEVEL_MS);
            if clock.is_running() && !self.halt_requested {
                tracing::debug!(msg_type = record.msg_type(), "report requested simulation stop");
                clock.request_stop();
                self.halt_requested = true;
            }
        }

        if actions.contains(Actions::ABORT) {
            pause(delay_level * ABORT_DELAY_PER_LEVEL_MS);
            flush_outputs(outputs);
            clock.abort();
        }

        if actions.contains(Actions::ESCALATE) {
            pause(delay_level * ABORT_DELAY_PER_LEVEL_MS);
            if displayed.is_empty() {
                displayed = composer.compose(record);
            }
            if displayed.is_empty() {
                displayed = record.message().to_owned();
            }
            let location = record.location();
            return Err(EscalatedReport::new(
                record.severity(),
                record.msg_type().to_owned(),
                record.message().to_owned(),
                location.map(|l| l.file().to_owned()),
                location.map(SourceLocation::line),
                displayed,
            )
            .into());
        }

        if clock.current_time() != 0 && !clock.is_running() {
            flush_outputs(outputs);
        }
        Ok(())
    }
}

fn pause(millis: u64) {
    if millis > 0 {
        thread::sleep(Duration::from_millis(millis));
    }
}

fn write_composed(sink: &dyn Sink, record: &LogRecord, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Err(error) = sink.write(record.level().emit_level(), text) {
        tracing::warn!(msg_type = record.msg_type(), %error, "failed to write report");
    }
}

fn flush_outputs(outputs: Outputs<'_>) {
    let display = outputs.display.flush();
    let persist = outputs.persist.map_or(Ok(()), |sink| sink.flush());
    if let Err(error) = display.and(persist) {
        tracing::warn!(%error, "failed to flush report sinks");
    }
}
