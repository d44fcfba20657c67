//! crates/logging-sink/src/tracing_sink.rs
//! Bridge from composed reports to the tracing crate.
//!
//! [`TracingSink`] lets a simulation run inside a host application that
//! already collects diagnostics through `tracing`: every report becomes an
//! event under the `simreport` target at the matching `tracing` level.
//! [`init_tracing`] installs a formatting subscriber for binaries that have
//! none.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use logging_sink::{TracingSink, init_tracing};
//!
//! init_tracing("simreport=debug")?;
//! let sink = Arc::new(TracingSink::new());
//! ```

use std::io;
use std::sync::atomic::{AtomicU8, Ordering};

use tracing_subscriber::EnvFilter;

use crate::level::EmitLevel;
use crate::sink::Sink;

/// Sink that re-emits reports as `tracing` events.
///
/// `critical` reports map to `tracing::Level::ERROR`; `tracing` has no higher level.
#[derive(Debug, Default)]
pub struct TracingSink {
    minimum: AtomicU8,
}

impl TracingSink {
    /// Creates a sink accepting every level; filtering is left to the subscriber.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            minimum: AtomicU8::new(EmitLevel::Trace as u8),
        }
    }
}

impl Sink for TracingSink {
    fn write(&self, level: EmitLevel, text: &str) -> io::Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }
        match level {
            EmitLevel::Trace => tracing::trace!(target: "simreport", "{text}"),
            EmitLevel::Debug => tracing::debug!(target: "simreport", "{text}"),
            EmitLevel::Info => tracing::info!(target: "simreport", "{text}"),
            EmitLevel::Warn => tracing::warn!(target: "simreport", "{text}"),
            EmitLevel::Error | EmitLevel::Critical => {
                tracing::error!(target: "simreport", critical = level == EmitLevel::Critical, "{text}");
            }
            EmitLevel::Off => {}
        }
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }

    fn set_minimum_level(&self, level: EmitLevel) {
        self.minimum.store(level.index(), Ordering::Relaxed);
    }

    fn minimum_level(&self) -> EmitLevel {
        EmitLevel::from_index(self.minimum.load(Ordering::Relaxed))
    }
}

/// Installs a global `tracing-subscriber` formatter filtered by `directives`.
///
/// `directives` uses the `EnvFilter` syntax (for example `"simreport=info"`).
/// `RUST_LOG`, when set, takes precedence. Fails if a global subscriber is
/// already installed.
pub fn init_tracing(
    directives: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));
    tracing_subscriber::fmt().with_env_filter(filter).try_init()
}
