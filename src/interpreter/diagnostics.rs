//! Diagnostic messages emitted during a run
//!
//! The core never prints. It produces [`Diagnostic`] values and hands them to
//! whoever drives it (see [`StepHook::report`]); the console and the trace
//! viewer decide how they look.
//!
//! [`StepHook::report`]: crate::interpreter::engine::StepHook::report

use crate::interpreter::errors::RuntimeError;
use crate::parser::SourceLocation;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Position traces and other informational lines
    Info,
    /// Non-fatal notices, such as a halt
    Warning,
    /// The run was aborted
    Fatal,
}

/// `at <file>:<line>:<column>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub file: String,
    pub location: SourceLocation,
}

impl Trace {
    pub fn new(file: impl Into<String>, location: SourceLocation) -> Self {
        Trace {
            file: file.into(),
            location,
        }
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}:{}", self.file, self.location)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub trace: Option<Trace>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            message: message.into(),
            trace: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, message)
    }

    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.trace = Some(trace);
        self
    }
}

impl From<&RuntimeError> for Diagnostic {
    fn from(error: &RuntimeError) -> Self {
        Diagnostic::fatal(error.to_string()).with_trace(error.trace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::errors::ErrorKind;

    #[test]
    fn test_fatal_from_runtime_error() {
        let error = RuntimeError::new(
            ErrorKind::DivisionByZero,
            SourceLocation::new(1, 2),
            "div.naz",
        );
        let diagnostic = Diagnostic::from(&error);
        assert_eq!(diagnostic.severity, Severity::Fatal);
        assert_eq!(diagnostic.message, "division by zero");
        assert_eq!(diagnostic.trace.unwrap().to_string(), "at div.naz:1:2");
    }

    #[test]
    fn test_warning_without_trace() {
        let diagnostic = Diagnostic::warning("program halted.");
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert!(diagnostic.trace.is_none());
    }
}
