//! Inference diagnostics
//!
//! The walker degrades silently on input it cannot fully interpret. Each
//! such case is reported to a [`DiagnosticLogger`] so callers can trace or
//! collect them; the generated schema is the same whichever logger is used.

use std::sync::Mutex;

/// A silent degradation observed while building a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Geo subtype with no registered snippet; the node stays unexpanded
    UnknownSubType { path: String, sub_type: String },
    /// No declared type, no sample, no children; the node stays empty
    UndeterminedType { path: String },
    /// Declared type outside the known table; the sample decided instead
    UnrecognizedSourceType { path: String, type_name: String },
}

impl Diagnostic {
    /// Dotted path of the field the diagnostic refers to
    pub fn path(&self) -> &str {
        match self {
            Diagnostic::UnknownSubType { path, .. }
            | Diagnostic::UndeterminedType { path }
            | Diagnostic::UnrecognizedSourceType { path, .. } => path,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnknownSubType { path, sub_type } => {
                write!(f, "{path}: no geometry snippet for subtype '{sub_type}'")
            }
            Diagnostic::UndeterminedType { path } => {
                write!(f, "{path}: type could not be determined")
            }
            Diagnostic::UnrecognizedSourceType { path, type_name } => {
                write!(f, "{path}: unrecognized mapping type '{type_name}'")
            }
        }
    }
}

/// Receiver for diagnostics
pub trait DiagnosticLogger: Send + Sync {
    /// Record one diagnostic
    fn log(&self, diagnostic: &Diagnostic);
}

/// Emits diagnostics as `tracing` debug events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl DiagnosticLogger for TracingLogger {
    fn log(&self, diagnostic: &Diagnostic) {
        tracing::debug!(path = diagnostic.path(), "{diagnostic}");
    }
}

/// Discards diagnostics
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl DiagnosticLogger for NoopLogger {
    fn log(&self, _diagnostic: &Diagnostic) {}
}

/// Keeps every diagnostic for later inspection
#[derive(Debug, Default)]
pub struct CollectingLogger {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingLogger {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the collected diagnostics, leaving the collector empty
    pub fn take(&self) -> Vec<Diagnostic> {
        match self.diagnostics.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl DiagnosticLogger for CollectingLogger {
    fn log(&self, diagnostic: &Diagnostic) {
        match self.diagnostics.lock() {
            Ok(mut guard) => guard.push(diagnostic.clone()),
            Err(poisoned) => poisoned.into_inner().push(diagnostic.clone()),
        }
    }
}
