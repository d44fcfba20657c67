//! Report sources and the records they produce.

use crate::level::{Severity, Verbosity, VerbosityLevel};

/// Identity of a component that logs: its place in the hierarchy plus aliases.
///
/// The scoped name is the dot-separated instance path (`top.cpu.fetch`).
/// Features are secondary dot-separated identifiers that can be configured
/// independently of the hierarchy (`mem.cache`). The type name is the
/// component's type, used as a further configuration axis.
///
/// # Examples
///
/// ```
/// use logging::LogSource;
///
/// let source = LogSource::new("top.cpu").with_feature("pipeline").with_type_name("Cpu");
/// assert_eq!(source.lookup_name(), "top.cpu");
///
/// let detached = LogSource::new("").with_feature("dma.engine");
/// assert_eq!(detached.lookup_name(), "dma.engine");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct LogSource {
    scoped_name: String,
    features: Vec<String>,
    type_name: String,
}

impl LogSource {
    /// Creates a source with the given scoped name and no aliases.
    #[must_use]
    pub fn new(scoped_name: impl Into<String>) -> Self {
        Self {
            scoped_name: scoped_name.into(),
            features: Vec::new(),
            type_name: String::new(),
        }
    }

    /// Adds a feature alias.
    #[must_use]
    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.features.push(feature.into());
        self
    }

    /// Adds several feature aliases.
    #[must_use]
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features.extend(features.into_iter().map(Into::into));
        self
    }

    /// Sets the type name.
    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    /// Sets the type name to the Rust type name of `T`.
    #[must_use]
    pub fn with_type<T: ?Sized>(self) -> Self {
        self.with_type_name(std::any::type_name::<T>())
    }

    /// Hierarchical instance path as given.
    #[must_use]
    pub fn scoped_name(&self) -> &str {
        &self.scoped_name
    }

    /// Feature aliases in insertion order.
    #[must_use]
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Type name, empty when unknown.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Name used for lookups and as the message type: the scoped name, or
    /// the first feature when the scoped name is empty.
    #[must_use]
    pub fn lookup_name(&self) -> &str {
        if self.scoped_name.is_empty() {
            self.features.first().map_or("", String::as_str)
        } else {
            &self.scoped_name
        }
    }
}

/// File and line a report was issued from.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SourceLocation {
    file: String,
    line: u32,
}

impl SourceLocation {
    /// Creates a location.
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Source file path.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Line number; zero means unknown.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }
}

/// One report, immutable once stamped.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogRecord {
    level: VerbosityLevel,
    msg_type: String,
    message: String,
    id: Option<u32>,
    location: Option<SourceLocation>,
    process: Option<String>,
    timestamp: u64,
    delta: u64,
}

impl LogRecord {
    /// Creates a record; the time stamp is filled in when the record is dispatched.
    #[must_use]
    pub fn new(
        level: VerbosityLevel,
        msg_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            msg_type: msg_type.into(),
            message: message.into(),
            id: None,
            location: None,
            process: None,
            timestamp: 0,
            delta: 0,
        }
    }

    /// Attaches a numeric message identifier.
    #[must_use]
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    /// Attaches the issuing file and line.
    #[must_use]
    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.location = Some(SourceLocation::new(file, line));
        self
    }

    /// Attaches the name of the simulation process that issued the report.
    #[must_use]
    pub fn with_process(mut self, process: impl Into<String>) -> Self {
        self.process = Some(process.into());
        self
    }

    /// Sets the simulated time (in ticks) and delta-cycle count.
    #[must_use]
    pub fn stamped(mut self, timestamp: u64, delta: u64) -> Self {
        self.timestamp = timestamp;
        self.delta = delta;
        self
    }

    /// Record level.
    #[must_use]
    pub const fn level(&self) -> VerbosityLevel {
        self.level
    }

    /// Severity derived from the level.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.level.severity()
    }

    /// Verbosity derived from the level.
    #[must_use]
    pub const fn verbosity(&self) -> Verbosity {
        self.level.verbosity()
    }

    /// Message type, normally the issuing source's name.
    #[must_use]
    pub fn msg_type(&self) -> &str {
        &self.msg_type
    }

    /// Message body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message identifier.
    #[must_use]
    pub const fn id(&self) -> Option<u32> {
        self.id
    }

    /// Issuing file and line.
    #[must_use]
    pub const fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// Issuing process name.
    #[must_use]
    pub fn process(&self) -> Option<&str> {
        self.process.as_deref()
    }

    /// Simulated time in ticks.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Delta-cycle count at the time stamp.
    #[must_use]
    pub const fn delta(&self) -> u64 {
        self.delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_name_prefers_scoped_name() {
        let source = LogSource::new("top.a").with_features(["x", "y"]);
        assert_eq!(source.lookup_name(), "top.a");
        assert_eq!(source.features(), ["x", "y"]);
    }

    #[test]
    fn lookup_name_is_empty_without_name_or_features() {
        assert_eq!(LogSource::default().lookup_name(), "");
    }

    #[test]
    fn with_type_uses_rust_type_name() {
        struct Fetch;
        let source = LogSource::new("top").with_type::<Fetch>();
        assert!(source.type_name().ends_with("Fetch"));
    }

    #[test]
    fn record_builders_fill_optional_fields() {
        let record = LogRecord::new(VerbosityLevel::Error, "top.bus", "timeout")
            .with_id(7)
            .with_location("bus.rs", 12)
            .with_process("top.bus.arbiter")
            .stamped(1_000, 3);

        assert_eq!(record.severity(), Severity::Error);
        assert_eq!(record.id(), Some(7));
        assert_eq!(record.location().map(SourceLocation::line), Some(12));
        assert_eq!(record.process(), Some("top.bus.arbiter"));
        assert_eq!((record.timestamp(), record.delta()), (1_000, 3));
    }
}
