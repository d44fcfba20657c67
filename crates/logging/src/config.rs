//! crates/logging/src/config.rs
//! User-facing report configuration.

use crate::level::{Severity, VerbosityLevel};

/// Message-type column width used when none is configured.
pub const DEFAULT_TYPE_FIELD_WIDTH: u32 = 24;

/// Type-field width that prints the message type without padding.
pub const UNPADDED_TYPE_FIELD: u32 = u32::MAX;

/// Report configuration, built fluently.
///
/// The fields are public for inspection; the same-named methods are chaining
/// setters.
///
/// # Examples
///
/// ```
/// use logging::{LogConfig, Severity, VerbosityLevel};
///
/// let config = LogConfig::new()
///     .level(VerbosityLevel::Debug)
///     .msg_type_field_width(20)
///     .file_info_from(None)
///     .log_async(false)
///     .print_sim_time(false);
///
/// assert_eq!(config.level, VerbosityLevel::Debug);
/// assert_eq!(config.msg_type_field_width, 20);
/// assert!(config.print_severity);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Default threshold for sources without a configured level.
    pub level: VerbosityLevel,
    /// Width of the message-type column; 0 omits it, [`UNPADDED_TYPE_FIELD`] prints it unpadded.
    pub msg_type_field_width: u32,
    /// Wall-clock time stamps; kept for configuration compatibility, composition ignores it.
    pub print_sys_time: bool,
    /// Prefix reports with the simulated time.
    pub print_sim_time: bool,
    /// Include the delta-cycle count in the time prefix.
    pub print_delta: bool,
    /// Tag console and file lines with the report level.
    pub print_severity: bool,
    /// Colour console lines by level.
    pub colored_output: bool,
    /// File that persists reports; empty disables the file sink.
    pub log_file_name: String,
    /// Regular expression selecting which message types may emit info reports.
    pub log_filter_regex: String,
    /// Write through a background thread.
    pub log_async: bool,
    /// Show only the first error report in full; later ones are not displayed.
    pub report_only_first_error: bool,
    /// Lowest severity that carries file, line and process details.
    pub file_info_from: Option<Severity>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: VerbosityLevel::Warning,
            msg_type_field_width: DEFAULT_TYPE_FIELD_WIDTH,
            print_sys_time: false,
            print_sim_time: true,
            print_delta: false,
            print_severity: true,
            colored_output: true,
            log_file_name: String::new(),
            log_filter_regex: String::new(),
            log_async: true,
            report_only_first_error: false,
            file_info_from: Some(Severity::Info),
        }
    }
}

impl LogConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default threshold.
    #[must_use]
    pub fn level(mut self, level: VerbosityLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the message-type column width.
    #[must_use]
    pub fn msg_type_field_width(mut self, width: u32) -> Self {
        self.msg_type_field_width = width;
        self
    }

    /// Enables or disables wall-clock time stamps.
    #[must_use]
    pub fn print_sys_time(mut self, enable: bool) -> Self {
        self.print_sys_time = enable;
        self
    }

    /// Enables or disables the simulated-time prefix.
    #[must_use]
    pub fn print_sim_time(mut self, enable: bool) -> Self {
        self.print_sim_time = enable;
        self
    }

    /// Enables or disables delta-cycle counts in the time prefix.
    #[must_use]
    pub fn print_delta(mut self, enable: bool) -> Self {
        self.print_delta = enable;
        self
    }

    /// Enables or disables level tags on output lines.
    #[must_use]
    pub fn print_severity(mut self, enable: bool) -> Self {
        self.print_severity = enable;
        self
    }

    /// Sets the persisted log file.
    #[must_use]
    pub fn log_file_name(mut self, name: impl Into<String>) -> Self {
        self.log_file_name = name.into();
        self
    }

    /// Enables or disables colour on the console.
    #[must_use]
    pub fn colored_output(mut self, enable: bool) -> Self {
        self.colored_output = enable;
        self
    }

    /// Sets the message-type filter pattern.
    #[must_use]
    pub fn log_filter_regex(mut self, pattern: impl Into<String>) -> Self {
        self.log_filter_regex = pattern.into();
        self
    }

    /// Enables or disables background writing.
    #[must_use]
    pub fn log_async(mut self, enable: bool) -> Self {
        self.log_async = enable;
        self
    }

    /// Enables or disables suppression of repeated error reports.
    #[must_use]
    pub fn report_only_first_error(mut self, enable: bool) -> Self {
        self.report_only_first_error = enable;
        self
    }

    /// Sets the lowest severity that carries location details; `None` disables them.
    #[must_use]
    pub fn file_info_from(mut self, severity: Option<Severity>) -> Self {
        self.file_info_from = severity;
        self
    }
}
