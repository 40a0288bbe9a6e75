// Execution engine for the naz interpreter

use crate::interpreter::diagnostics::{Diagnostic, Trace};
use crate::interpreter::errors::{ErrorKind, RuntimeError};
use crate::interpreter::ops;
use crate::memory::functions::FunctionTable;
use crate::memory::{Mode, State};
use crate::parser::{Program, SourceLocation, Token};
use crate::snapshot::{Snapshot, SnapshotManager};
use std::time::{Duration, Instant};

/// Hooks the stepper calls while it runs
///
/// `pause` is the only place where time passes. It cannot change what the
/// program does; it only paces it.
pub trait StepHook {
    /// Called between two processed positions
    fn pause(&mut self, delay: Duration, interpreter: &Interpreter);

    /// Receives every diagnostic the run emits, in order
    fn report(&mut self, diagnostic: &Diagnostic);
}

/// Hook that never waits and ignores diagnostics
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPacing;

impl StepHook for NoPacing {
    fn pause(&mut self, _delay: Duration, _interpreter: &Interpreter) {}

    fn report(&mut self, _diagnostic: &Diagnostic) {}
}

/// Result of a single [`Interpreter::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// More positions remain
    Continue,
    /// `h` was executed; nothing further runs
    Halted,
    /// The end of the program was reached
    Finished,
}

/// What a successful run hands back to the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub output: String,
    pub halted: bool,
    pub steps: usize,
    pub elapsed: Duration,
}

/// Steps through a naz program one position at a time
pub struct Interpreter {
    program: Program,

    /// Source identifier used in traces
    file: String,

    /// Register, function slots, output and control flags
    state: State,

    /// Index of the next program position
    position: usize,

    /// Where the last processed position was (opcode column for instructions)
    current_location: Option<SourceLocation>,

    /// Pause between steps, forwarded to the hook
    delay: Duration,

    /// Number of positions processed so far
    steps: usize,

    /// Whether execution has finished (end of program or halt)
    finished: bool,

    diagnostics: Vec<Diagnostic>,

    /// Per-step history, only kept for the trace viewer
    history: Option<SnapshotManager>,

    /// Cleared once the history budget runs out
    recording_history: bool,
}

impl Interpreter {
    /// Create an interpreter for `source`, using `file` in traces
    pub fn new(source: &str, file: impl Into<String>) -> Self {
        Interpreter {
            program: Program::new(source),
            file: file.into(),
            state: State::new(),
            position: 0,
            current_location: None,
            delay: Duration::ZERO,
            steps: 0,
            finished: false,
            diagnostics: Vec::new(),
            history: None,
            recording_history: false,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Keep a snapshot after every step, up to `memory_limit` bytes (estimated)
    pub fn with_history(mut self, memory_limit: usize) -> Self {
        self.history = Some(SnapshotManager::new(memory_limit));
        self.recording_history = true;
        self.take_snapshot();
        self
    }

    /// Run the program to the end, a halt, or the first error
    pub fn run<H: StepHook>(&mut self, hook: &mut H) -> Result<Completion, RuntimeError> {
        let started = Instant::now();
        let mut reported = self.diagnostics.len();

        loop {
            let result = self.step();

            for diagnostic in &self.diagnostics[reported..] {
                hook.report(diagnostic);
            }
            reported = self.diagnostics.len();

            match result? {
                StepResult::Continue => hook.pause(self.delay, self),
                StepResult::Halted | StepResult::Finished => break,
            }
        }

        Ok(Completion {
            output: self.state.output.as_str().to_string(),
            halted: self.state.halted,
            steps: self.steps,
            elapsed: started.elapsed(),
        })
    }

    /// Process exactly one program position
    pub fn step(&mut self) -> Result<StepResult, RuntimeError> {
        if self.state.halted {
            return Ok(StepResult::Halted);
        }

        let raw = match self.program.get(self.position) {
            Some(raw) => *raw,
            None => {
                self.finished = true;
                return Ok(StepResult::Finished);
            }
        };

        self.current_location = Some(raw.location);
        let token = raw
            .decode()
            .map_err(|error| self.error(error.into(), raw.location))?;

        match token {
            Token::LineBreak => self.state.end_line(),
            Token::Instruction(instruction) => match self.state.recording {
                Some(slot) => self.state.functions.record(slot, instruction),
                None => {
                    let at = raw.location.opcode();
                    self.current_location = Some(at);
                    ops::apply(instruction, &mut self.state)
                        .map_err(|kind| self.error(kind, at))?;
                }
            },
        }

        self.position += 1;
        self.steps += 1;
        self.take_snapshot();

        if self.state.halted {
            self.finished = true;
            let diagnostic = Diagnostic::warning("program halted.").with_trace(self.trace());
            self.diagnostics.push(diagnostic);
            return Ok(StepResult::Halted);
        }

        if self.position >= self.program.len() {
            self.finished = true;
            return Ok(StepResult::Finished);
        }

        Ok(StepResult::Continue)
    }

    fn error(&self, kind: ErrorKind, location: SourceLocation) -> RuntimeError {
        RuntimeError::new(kind, location, self.file.clone())
    }

    /// Position trace for the last processed location
    pub fn trace(&self) -> Trace {
        Trace::new(
            self.file.clone(),
            self.current_location
                .unwrap_or_else(|| SourceLocation::new(1, 1)),
        )
    }

    fn take_snapshot(&mut self) {
        if !self.recording_history {
            return;
        }
        let Some(history) = self.history.as_mut() else {
            return;
        };

        let snapshot = Snapshot::capture(
            &self.state,
            self.steps,
            self.position,
            self.current_location,
        );
        if let Err(message) = history.push(snapshot) {
            self.recording_history = false;
            self.diagnostics.push(Diagnostic::warning(format!(
                "{}; later steps are not recorded",
                message
            )));
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn register(&self) -> i32 {
        self.state.register.value()
    }

    pub fn output(&self) -> &str {
        self.state.output.as_str()
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.state.functions
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current_location(&self) -> Option<SourceLocation> {
        self.current_location
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_halted(&self) -> bool {
        self.state.halted
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn history(&self) -> Option<&SnapshotManager> {
        self.history.as_ref()
    }
}
