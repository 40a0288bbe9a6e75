//! # Introduction
//!
//! naz runs programs written in naz, a tiny language whose only data is a
//! single bounded register. Every instruction is a digit followed by an opcode
//! letter, and the interpreter walks them one at a time with an optional pause
//! between steps. Runs can be watched live on the console or recorded and
//! replayed afterwards in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Program → Stepper → Dispatcher → Output / Snapshots
//! ```
//!
//! 1. [`parser`]: cuts the source into two-character slices and validates each
//!    one when execution reaches it.
//! 2. [`interpreter`]: the stepper, the opcode dispatcher, typed errors and
//!    diagnostics.
//! 3. [`memory`]: the register, the ten function slots and the run state.
//! 4. [`snapshot`]: the output buffer and the bounded per-step history.
//! 5. [`console`]: spinner, pacing and coloured messages for console runs.
//! 6. [`ui`]: ratatui-based trace viewer; not part of the stable library API.
//!
//! ## Instruction set
//!
//! `a` add, `s` subtract, `m` multiply, `d` divide, `p` modulo, `o` output,
//! `f` function, `x` mode, `h` halt. The register is bounded to [-127, 127].

pub mod console;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod snapshot;
pub mod ui;
