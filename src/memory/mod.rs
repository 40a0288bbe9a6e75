//! Machine state for the naz interpreter
//!
//! This module provides the mutable state a run works on:
//! - [`register`]: the bounded accumulator
//! - [`functions`]: the ten recordable function slots
//! - [`State`]: register, slots, output and the control flags, owned by one run
//!
//! # Modes
//!
//! `1x` puts the machine in [`Mode::Declaring`], where `f` arms recording into a
//! slot instead of invoking it. Every line break ends recording and drops back
//! to [`Mode::Normal`].

pub mod functions;
pub mod register;

use crate::snapshot::OutputBuffer;
use functions::FunctionTable;
use register::Register;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Declaring,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Normal => write!(f, "normal"),
            Mode::Declaring => write!(f, "declaring"),
        }
    }
}

/// Everything the dispatcher reads and writes
#[derive(Debug, Clone, Default)]
pub struct State {
    pub register: Register,
    pub functions: FunctionTable,
    pub output: OutputBuffer,
    pub mode: Mode,
    /// Slot receiving the rest of the current line, if any
    pub recording: Option<u8>,
    pub halted: bool,
    /// Current function nesting level (0 at top level)
    pub depth: usize,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line break bookkeeping: stop recording and leave declaring mode
    pub fn end_line(&mut self) {
        self.recording = None;
        self.mode = Mode::Normal;
    }
}
