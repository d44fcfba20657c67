//! crates/logging/src/level.rs
//! Verbosity levels, severities and the static table that relates them.
//!
//! Every report carries a [`VerbosityLevel`]. The same type doubles as the
//! threshold configured for a log source: a record passes when the
//! threshold's [`Verbosity`] is at least the record's. The level also selects
//! the [`Severity`] that drives action dispatch, and the [`EmitLevel`] a sink
//! sees.

use std::fmt;
use std::str::FromStr;

use logging_sink::EmitLevel;

/// Ordered verbosity level, from silent to everything.
///
/// # Examples
///
/// ```
/// use logging::{Severity, Verbosity, VerbosityLevel};
///
/// assert_eq!(VerbosityLevel::Debug.severity(), Severity::Info);
/// assert_eq!(VerbosityLevel::Debug.verbosity(), Verbosity::High);
/// assert!(VerbosityLevel::Info.admits(VerbosityLevel::Warning));
/// assert!(!VerbosityLevel::Info.admits(VerbosityLevel::Debug));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VerbosityLevel {
    /// Nothing but fatal conditions.
    None = 0,
    /// Fatal conditions.
    Fatal = 1,
    /// Errors.
    Error = 2,
    /// Warnings.
    #[default]
    Warning = 3,
    /// Informational messages.
    Info = 4,
    /// Debugging output.
    Debug = 5,
    /// Detailed tracing.
    Trace = 6,
    /// Everything.
    TraceAll = 7,
}

/// Severity class of a report; selects its actions.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Severity {
    /// Informational.
    Info = 0,
    /// Warning.
    Warning = 1,
    /// Error.
    Error = 2,
    /// Fatal.
    Fatal = 3,
}

/// Numeric verbosity threshold attached to each level.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Verbosity {
    /// Always shown.
    None = 0,
    /// Shown at low verbosity.
    Low = 100,
    /// Shown at medium verbosity.
    Medium = 200,
    /// Shown at high verbosity.
    High = 300,
    /// Shown at full verbosity.
    Full = 400,
    /// Shown only when debugging.
    Debug = 500,
}

struct LevelInfo {
    severity: Severity,
    verbosity: Verbosity,
}

const LEVEL_TABLE: [LevelInfo; 8] = [
    LevelInfo {
        severity: Severity::Fatal,
        verbosity: Verbosity::None,
    },
    LevelInfo {
        severity: Severity::Fatal,
        verbosity: Verbosity::Low,
    },
    LevelInfo {
        severity: Severity::Error,
        verbosity: Verbosity::Low,
    },
    LevelInfo {
        severity: Severity::Warning,
        verbosity: Verbosity::Low,
    },
    LevelInfo {
        severity: Severity::Info,
        verbosity: Verbosity::Medium,
    },
    LevelInfo {
        severity: Severity::Info,
        verbosity: Verbosity::High,
    },
    LevelInfo {
        severity: Severity::Info,
        verbosity: Verbosity::Full,
    },
    LevelInfo {
        severity: Severity::Info,
        verbosity: Verbosity::Debug,
    },
];

impl VerbosityLevel {
    /// All levels in ascending order.
    pub const ALL: [Self; 8] = [
        Self::None,
        Self::Fatal,
        Self::Error,
        Self::Warning,
        Self::Info,
        Self::Debug,
        Self::Trace,
        Self::TraceAll,
    ];

    /// Returns the numeric position of the level (0..=7).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the level at `index`, clamping to [`VerbosityLevel::TraceAll`].
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match index {
            0 => Self::None,
            1 => Self::Fatal,
            2 => Self::Error,
            3 => Self::Warning,
            4 => Self::Info,
            5 => Self::Debug,
            6 => Self::Trace,
            _ => Self::TraceAll,
        }
    }

    /// Converts a raw configuration value, clamping to [`VerbosityLevel::TraceAll`].
    ///
    /// Values are read as unsigned, so negatives clamp to `TraceAll` as well.
    #[must_use]
    pub fn from_config_value(value: i64) -> Self {
        usize::try_from(value).map_or(Self::TraceAll, Self::from_index)
    }

    /// Severity class of records logged at this level.
    #[must_use]
    pub const fn severity(self) -> Severity {
        LEVEL_TABLE[self.index()].severity
    }

    /// Numeric verbosity of this level.
    #[must_use]
    pub const fn verbosity(self) -> Verbosity {
        LEVEL_TABLE[self.index()].verbosity
    }

    /// Reports whether a record at `record` passes this level used as a threshold.
    #[must_use]
    pub const fn admits(self, record: Self) -> bool {
        self.verbosity() as u16 >= record.verbosity() as u16
    }

    /// Sink level used to emit records of this level.
    #[must_use]
    pub const fn emit_level(self) -> EmitLevel {
        match self.severity() {
            Severity::Info => match self.verbosity() {
                Verbosity::Full | Verbosity::Debug => EmitLevel::Trace,
                Verbosity::High => EmitLevel::Debug,
                _ => EmitLevel::Info,
            },
            Severity::Warning => EmitLevel::Warn,
            Severity::Error => EmitLevel::Error,
            Severity::Fatal => EmitLevel::Critical,
        }
    }

    /// Minimum sink level that shows this level and everything less verbose.
    ///
    /// Computed as `Off - min(Off, index)`, so `None` silences the sink and
    /// `Trace` and above open it completely.
    #[must_use]
    pub const fn minimum_emit_level(self) -> EmitLevel {
        let off = EmitLevel::Off.index();
        let index = if self.index() < off as usize {
            self.index() as u8
        } else {
            off
        };
        EmitLevel::from_index(off - index)
    }

    /// Lower-case name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
            Self::TraceAll => "trace_all",
        }
    }
}

impl fmt::Display for VerbosityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no verbosity level.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown verbosity level '{input}'")]
pub struct ParseLevelError {
    input: String,
}

impl ParseLevelError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for VerbosityLevel {
    type Err = ParseLevelError;

    /// Accepts level names (case-insensitive, `trace_all` or `traceall`) and numeric values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            return Ok(Self::from_config_value(value));
        }
        let level = match trimmed.to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "fatal" => Self::Fatal,
            "error" => Self::Error,
            "warning" | "warn" => Self::Warning,
            "info" => Self::Info,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            "trace_all" | "traceall" | "dbgtrace" => Self::TraceAll,
            _ => {
                return Err(ParseLevelError {
                    input: s.to_owned(),
                });
            }
        };
        Ok(level)
    }
}

impl Severity {
    /// Number of severities.
    pub const COUNT: usize = 4;

    /// All severities in ascending order.
    pub const ALL: [Self; 4] = [Self::Info, Self::Warning, Self::Error, Self::Fatal];

    /// Position of the severity (0..=3).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Letter used in identifier prefixes: `I`, `W`, `E` or `F`.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Info => 'I',
            Self::Warning => 'W',
            Self::Error => 'E',
            Self::Fatal => 'F',
        }
    }

    /// Lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Verbosity {
    /// Numeric threshold value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self as u16
    }
}
