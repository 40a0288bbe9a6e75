//! naz execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the stepper, which walks the program one position at a time
//! - [`ops`]: opcode dispatch, including function replay
//! - [`errors`]: runtime error types
//! - [`diagnostics`]: messages and position traces handed to the shell
//! - [`constants`]: machine limits
//!
//! # Execution Model
//!
//! Each step validates the next program position and then either ends the
//! current line, records the instruction into a function slot, or dispatches
//! it against the register. The first error aborts the run. Between steps the
//! stepper hands control to a [`engine::StepHook`], which owns all pacing.

pub mod constants;
pub mod diagnostics;
pub mod engine;
pub mod errors;
pub mod ops;
