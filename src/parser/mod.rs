//! Source handling for naz programs
//!
//! - [`lexer`]: cuts source text into two-character slices and validates them
//! - [`program`]: the program buffer the stepper walks
//! - [`ast`]: instruction, opcode and location types

pub mod ast;
pub mod lexer;
pub mod program;

pub use ast::{Instruction, Opcode, SourceLocation, Token};
pub use lexer::{FormatError, RawToken, Slice};
pub use program::Program;
