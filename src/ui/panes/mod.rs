//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: program text with opcode highlighting and the current token
//! - [`machine`]: register, mode, recording target and halt flag
//! - [`functions`]: the ten function slots and their recorded bodies
//! - [`output`]: everything the program has printed so far
//! - [`status`]: status bar with keybindings and execution state
//!
//! Each pane module exports a `render_*` function taking the frame, its area,
//! the data to show and whether the pane has focus.

pub mod functions;
pub mod machine;
pub mod output;
pub mod source;
pub mod status;

pub use functions::render_functions_pane;
pub use machine::render_machine_pane;
pub use output::render_output_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
