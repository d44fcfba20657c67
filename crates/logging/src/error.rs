//! crates/logging/src/error.rs
//!
//! Error types for report configuration and dispatch.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::level::Severity;

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors surfaced by the report pipeline.
///
/// Configuration provider failures never appear here: the resolver falls back
/// to the default threshold instead.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The configured message-type filter is not a valid regular expression.
    #[error("invalid log filter pattern '{pattern}': {source}")]
    InvalidFilter {
        /// Pattern as configured.
        pattern: String,
        /// Compilation failure.
        #[source]
        source: regex::Error,
    },
    /// The tick resolution is not a power of ten of femtoseconds.
    #[error("invalid time resolution of {femtoseconds} fs per tick; expected a power of ten")]
    InvalidResolution {
        /// Rejected femtoseconds-per-tick factor.
        femtoseconds: u64,
    },
    /// A sink could not be created.
    #[error("failed to open report sink: {0}")]
    Sink(
        #[from]
        #[source]
        io::Error,
    ),
    /// A report was logged before the context initialized logging.
    #[error("logging has not been initialized for this context")]
    NotInitialized,
    /// A report whose actions include escalation.
    #[error(transparent)]
    Escalated(Box<EscalatedReport>),
}

impl From<EscalatedReport> for ReportError {
    fn from(report: EscalatedReport) -> Self {
        Self::Escalated(Box::new(report))
    }
}

impl ReportError {
    /// Returns the escalated report, if this error carries one.
    #[must_use]
    pub fn as_escalated(&self) -> Option<&EscalatedReport> {
        match self {
            Self::Escalated(report) => Some(report.as_ref()),
            _ => None,
        }
    }
}

/// A report raised to the caller because its actions include escalation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscalatedReport {
    severity: Severity,
    msg_type: String,
    message: String,
    file: Option<String>,
    line: Option<u32>,
    composed: String,
}

impl EscalatedReport {
    pub(crate) fn new(
        severity: Severity,
        msg_type: String,
        message: String,
        file: Option<String>,
        line: Option<u32>,
        composed: String,
    ) -> Self {
        Self {
            severity,
            msg_type,
            message,
            file,
            line,
            composed,
        }
    }

    /// Severity of the escalated report.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Message type (the reporting source's name).
    #[must_use]
    pub fn msg_type(&self) -> &str {
        &self.msg_type
    }

    /// Message body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Source file of the report, when known.
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Source line of the report, when known.
    #[must_use]
    pub const fn line(&self) -> Option<u32> {
        self.line
    }

    /// Fully composed report text.
    #[must_use]
    pub fn composed(&self) -> &str {
        &self.composed
    }
}

impl fmt::Display for EscalatedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} report from {}: {}", self.severity, self.msg_type, self.message)?;
        if let (Some(file), Some(line)) = (&self.file, self.line) {
            write!(f, " ({file}:{line})")?;
        }
        Ok(())
    }
}

impl std::error::Error for EscalatedReport {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io::ErrorKind;

    fn escalated() -> EscalatedReport {
        EscalatedReport::new(
            Severity::Error,
            "top.dma".to_owned(),
            "descriptor ring overflow".to_owned(),
            Some("dma.rs".to_owned()),
            Some(42),
            "top.dma: descriptor ring overflow".to_owned(),
        )
    }

    #[test]
    fn sink_error_from_io_error() {
        let io_err = io::Error::new(ErrorKind::PermissionDenied, "read-only");
        let err: ReportError = io_err.into();

        assert!(matches!(err, ReportError::Sink(_)));
        assert!(err.to_string().contains("failed to open report sink"));
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_filter_keeps_pattern_and_source() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = ReportError::InvalidFilter {
            pattern: "(unclosed".to_owned(),
            source,
        };

        assert!(err.to_string().contains("'(unclosed'"));
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_resolution_names_factor() {
        let err = ReportError::InvalidResolution { femtoseconds: 2500 };
        assert!(err.to_string().contains("2500 fs"));
    }

    #[test]
    fn escalated_display_is_transparent() {
        let err: ReportError = escalated().into();
        assert_eq!(
            err.to_string(),
            "error report from top.dma: descriptor ring overflow (dma.rs:42)"
        );
        let report = err.as_escalated().unwrap();
        assert_eq!(report.line(), Some(42));
        assert_eq!(report.composed(), "top.dma: descriptor ring overflow");
    }

    #[test]
    fn as_escalated_is_none_for_other_errors() {
        assert!(ReportError::NotInitialized.as_escalated().is_none());
    }
}
