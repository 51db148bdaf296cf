//! Report stream for reconciliation outcomes
//!
//! The engine communicates every outcome through a sink rather than a
//! process-global logger: the CLI forwards events to `tracing`, while tests
//! capture them in memory and assert on content and order.

use parking_lot::Mutex;
use std::fmt;

/// Severity of a report event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for ReportLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportLevel::Debug => write!(f, "DEBUG"),
            ReportLevel::Info => write!(f, "INFO"),
            ReportLevel::Warn => write!(f, "WARN"),
            ReportLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// A single reported event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEvent {
    pub level: ReportLevel,
    pub message: String,
}

/// Destination for reconciliation reports.
pub trait ReportSink {
    fn emit(&self, level: ReportLevel, message: &str);

    fn debug(&self, message: &str) {
        self.emit(ReportLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.emit(ReportLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.emit(ReportLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.emit(ReportLevel::Error, message);
    }
}

/// Forwards report events to the active `tracing` subscriber.
#[derive(Debug, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn emit(&self, level: ReportLevel, message: &str) {
        match level {
            ReportLevel::Debug => tracing::debug!("{}", message),
            ReportLevel::Info => tracing::info!("{}", message),
            ReportLevel::Warn => tracing::warn!("{}", message),
            ReportLevel::Error => tracing::error!("{}", message),
        }
    }
}

/// Records events in memory, preserving emission order.
#[derive(Debug, Default)]
pub struct CaptureSink {
    events: Mutex<Vec<ReportEvent>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured events in emission order.
    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.lock().clone()
    }

    /// Captured messages in emission order, levels stripped.
    pub fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .map(|event| event.message.clone())
            .collect()
    }

    /// Whether any captured message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.events
            .lock()
            .iter()
            .any(|event| event.message.contains(needle))
    }
}

impl ReportSink for CaptureSink {
    fn emit(&self, level: ReportLevel, message: &str) {
        self.events.lock().push(ReportEvent {
            level,
            message: message.to_string(),
        });
    }
}
