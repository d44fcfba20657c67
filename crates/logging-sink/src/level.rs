use std::fmt;

/// Output level attached to every write, ordered from chattiest to quietest.
///
/// The six emitting levels follow the conventional `trace..critical` scale;
/// [`EmitLevel::Off`] sits above them and is only meaningful as a sink
/// minimum, where it silences the sink entirely.
///
/// # Examples
///
/// ```
/// use logging_sink::EmitLevel;
///
/// assert!(EmitLevel::Warn > EmitLevel::Info);
/// assert_eq!(EmitLevel::from_index(4), EmitLevel::Error);
/// assert_eq!(EmitLevel::from_index(42), EmitLevel::Off);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum EmitLevel {
    /// Finest-grained tracing output.
    #[default]
    Trace = 0,
    /// Debugging output.
    Debug = 1,
    /// Informational output.
    Info = 2,
    /// Warnings.
    Warn = 3,
    /// Errors.
    Error = 4,
    /// Fatal conditions.
    Critical = 5,
    /// Threshold that disables output.
    Off = 6,
}

impl EmitLevel {
    /// All levels in ascending order.
    pub const ALL: [Self; 7] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Critical,
        Self::Off,
    ];

    /// Returns the level at `index`, saturating to [`EmitLevel::Off`].
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Trace,
            1 => Self::Debug,
            2 => Self::Info,
            3 => Self::Warn,
            4 => Self::Error,
            5 => Self::Critical,
            _ => Self::Off,
        }
    }

    /// Returns the numeric position of the level.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Single-letter tag used by the console layout.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Trace => 'T',
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
            Self::Critical => 'C',
            Self::Off => 'O',
        }
    }

    /// Lower-case level name used by the file layout.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for EmitLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
