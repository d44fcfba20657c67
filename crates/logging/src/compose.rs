//! crates/logging/src/compose.rs
//! Deterministic rendering of a record into report text.
//!
//! The text is built from up to four parts:
//!
//! 1. a time prefix (`print_sim_time`), in cycles when a cycle base is set,
//!    otherwise as formatted simulated time, optionally followed by the delta
//!    count;
//! 2. an identifier prefix `(<letter><id>) <type>: ` or the padded type
//!    column `<type>: `;
//! 3. the message body;
//! 4. `[FILE:...]` and `[PROCESS:...]` continuation lines for records at or
//!    above `file_info_from`.
//!
//! Informational records whose type does not match the configured filter are
//! suppressed and compose to an empty string, except at medium verbosity.

use std::fmt::Write as _;

use regex::Regex;

use crate::config::{LogConfig, UNPADDED_TYPE_FIELD};
use crate::level::{Severity, Verbosity};
use crate::padding::padded;
use crate::record::LogRecord;
use crate::time::{TimeResolution, format_time};

const CONTINUATION_INDENT: &str = "\n         ";

/// Renders records according to a configuration.
///
/// A composer borrows everything it needs, so building one per report is
/// free.
///
/// # Examples
///
/// ```
/// use logging::{LogConfig, LogRecord, MessageComposer, VerbosityLevel};
///
/// let config = LogConfig::new().msg_type_field_width(10).print_sim_time(false);
/// let record = LogRecord::new(VerbosityLevel::Warning, "clk", "drift");
/// assert_eq!(MessageComposer::new(&config).compose(&record), "clk       : drift");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MessageComposer<'a> {
    config: &'a LogConfig,
    filter: Option<&'a Regex>,
    resolution: TimeResolution,
    cycle_base: u64,
    clock_running: bool,
}

impl<'a> MessageComposer<'a> {
    /// Composer for `config` with no filter, picosecond ticks and no cycle base.
    #[must_use]
    pub fn new(config: &'a LogConfig) -> Self {
        Self {
            config,
            filter: None,
            resolution: TimeResolution::default(),
            cycle_base: 0,
            clock_running: false,
        }
    }

    /// Uses the compiled message-type filter.
    #[must_use]
    pub fn with_filter(mut self, filter: Option<&'a Regex>) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the tick resolution used to format time stamps.
    #[must_use]
    pub fn with_resolution(mut self, resolution: TimeResolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Sets the ticks per cycle; zero prints formatted time instead of cycles.
    #[must_use]
    pub fn with_cycle_base(mut self, cycle_base: u64) -> Self {
        self.cycle_base = cycle_base;
        self
    }

    /// Tells the composer whether the simulation is running (process names are shown only then).
    #[must_use]
    pub fn with_clock_running(mut self, running: bool) -> Self {
        self.clock_running = running;
        self
    }

    /// Same settings, different configuration.
    #[must_use]
    pub fn with_config<'b>(&self, config: &'b LogConfig) -> MessageComposer<'b>
    where
        'a: 'b,
    {
        MessageComposer {
            config,
            filter: self.filter,
            resolution: self.resolution,
            cycle_base: self.cycle_base,
            clock_running: self.clock_running,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &'a LogConfig {
        self.config
    }

    /// Reports whether the filter hides `record`.
    #[must_use]
    pub fn suppresses(&self, record: &LogRecord) -> bool {
        let Some(filter) = self.filter else {
            return false;
        };
        record.severity() == Severity::Info
            && !self.config.log_filter_regex.is_empty()
            && record.verbosity() != Verbosity::Medium
            && !filter.is_match(record.msg_type())
    }

    /// Renders `record`; an empty string means the record is suppressed.
    #[must_use]
    pub fn compose(&self, record: &LogRecord) -> String {
        if self.suppresses(record) {
            return String::new();
        }

        let config = self.config;
        let mut out = String::with_capacity(64 + record.message().len());

        if config.print_sim_time {
            self.push_time(&mut out, record);
        }

        if let Some(id) = record.id() {
            let _ = write!(
                out,
                "({}{}) {}: ",
                record.severity().letter(),
                id,
                record.msg_type()
            );
        } else if config.msg_type_field_width == UNPADDED_TYPE_FIELD {
            let _ = write!(out, "{}: ", record.msg_type());
        } else if config.msg_type_field_width != 0 {
            out.push_str(&padded(
                record.msg_type(),
                config.msg_type_field_width as usize,
                true,
            ));
            out.push_str(": ");
        }

        out.push_str(record.message());

        if config
            .file_info_from
            .is_some_and(|from| record.severity() >= from)
        {
            if let Some(location) = record.location().filter(|l| l.line() != 0) {
                let _ = write!(
                    out,
                    "{CONTINUATION_INDENT}[FILE:{}:{}]",
                    location.file(),
                    location.line()
                );
            }
            if let Some(process) = record.process().filter(|_| self.clock_running) {
                let _ = write!(out, "{CONTINUATION_INDENT}[PROCESS:{process}]");
            }
        }

        out
    }

    fn push_time(&self, out: &mut String, record: &LogRecord) {
        let delta = self.config.print_delta;
        if self.cycle_base > 0 {
            let cycles = record.timestamp() / self.cycle_base;
            if delta {
                let _ = write!(out, "[{cycles:>7}({:>5})]", record.delta());
            } else {
                let _ = write!(out, "[{cycles:>7}]");
            }
        } else {
            let time = format_time(record.timestamp(), self.resolution);
            if delta {
                let _ = write!(out, "[{time:>20}({:>5})]", record.delta());
            } else {
                let _ = write!(out, "[{time:>20}]");
            }
        }
    }
}
