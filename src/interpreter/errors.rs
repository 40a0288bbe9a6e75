//! Runtime error types for the naz interpreter
//!
//! This module defines [`ErrorKind`], the diagnosis produced by the validator or
//! the dispatcher, and [`RuntimeError`], which pins a kind to the file and
//! position where it happened.
//!
//! All errors are fatal. The language has no recoverable error class; the
//! stepper returns the first error and the shell decides the exit status.

use crate::interpreter::diagnostics::Trace;
use crate::parser::{FormatError, SourceLocation};
use std::fmt;

/// Broad grouping of [`ErrorKind`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Format,
    Arithmetic,
    Semantic,
}

/// Everything that can abort a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed instruction shape
    Format(FormatError),

    /// `d` or `p` with operand 0
    DivisionByZero,

    /// `a`, `s` or `m` pushed the register outside [-127, 127]
    RegisterOutOfBounds(i32),

    /// `f` invoked a slot that has no recorded body
    UndeclaredFunction(u8),

    /// `o` with a register value that maps to no character
    InvalidOutputValue(i32),

    /// `x` with an operand other than 0 or 1
    InvalidOpcode(u8),

    /// Function replay nested deeper than the interpreter allows
    DepthExceeded,
}

impl ErrorKind {
    pub fn class(&self) -> ErrorClass {
        match self {
            ErrorKind::Format(_) => ErrorClass::Format,
            ErrorKind::DivisionByZero | ErrorKind::RegisterOutOfBounds(_) => {
                ErrorClass::Arithmetic
            }
            ErrorKind::UndeclaredFunction(_)
            | ErrorKind::InvalidOutputValue(_)
            | ErrorKind::InvalidOpcode(_)
            | ErrorKind::DepthExceeded => ErrorClass::Semantic,
        }
    }
}

impl From<FormatError> for ErrorKind {
    fn from(error: FormatError) -> Self {
        ErrorKind::Format(error)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Format(error) => write!(f, "{}", error),
            ErrorKind::DivisionByZero => write!(f, "division by zero"),
            ErrorKind::RegisterOutOfBounds(_) => write!(f, "register value out of bounds"),
            ErrorKind::UndeclaredFunction(_) => write!(f, "use of undeclared function"),
            ErrorKind::InvalidOutputValue(_) => write!(f, "invalid output value"),
            ErrorKind::InvalidOpcode(_) => write!(f, "invalid opcode"),
            ErrorKind::DepthExceeded => write!(f, "maximum function depth exceeded"),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// A fatal error with the position it was raised at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub kind: ErrorKind,
    pub location: SourceLocation,
    pub file: String,
}

impl RuntimeError {
    pub fn new(kind: ErrorKind, location: SourceLocation, file: impl Into<String>) -> Self {
        RuntimeError {
            kind,
            location,
            file: file.into(),
        }
    }

    pub fn trace(&self) -> Trace {
        Trace::new(self.file.clone(), self.location)
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ErrorKind::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            ErrorKind::RegisterOutOfBounds(128).to_string(),
            "register value out of bounds"
        );
        assert_eq!(
            ErrorKind::from(FormatError::ChainedNumberLiterals).to_string(),
            "attempt to chain number literals"
        );
    }

    #[test]
    fn test_classes() {
        assert_eq!(
            ErrorKind::Format(FormatError::MissingInstruction).class(),
            ErrorClass::Format
        );
        assert_eq!(ErrorKind::DivisionByZero.class(), ErrorClass::Arithmetic);
        assert_eq!(ErrorKind::UndeclaredFunction(4).class(), ErrorClass::Semantic);
    }

    #[test]
    fn test_trace_points_at_location() {
        let error = RuntimeError::new(
            ErrorKind::InvalidOpcode(2),
            SourceLocation::new(3, 4),
            "prog.naz",
        );
        assert_eq!(error.to_string(), "invalid opcode");
        assert_eq!(error.trace().to_string(), "at prog.naz:3:4");
    }
}
