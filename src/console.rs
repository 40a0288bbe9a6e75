//! Console front end: spinner, pacing and coloured diagnostics on stderr
//!
//! The spinner and diagnostics go to stderr while the program runs; the final
//! summary with the program output goes to stdout.

use crate::interpreter::diagnostics::{Diagnostic, Severity};
use crate::interpreter::engine::{Completion, Interpreter, StepHook};
use crate::interpreter::errors::RuntimeError;
use crossterm::{
    cursor, queue,
    style::{Print, Stylize},
    terminal::{Clear, ClearType},
};
use std::io::{self, IsTerminal, Write};
use std::thread;
use std::time::{Duration, Instant};

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

/// Single-line activity indicator drawn on stderr
pub struct Spinner {
    frame: usize,
    last_draw: Option<Instant>,
    visible: bool,
    enabled: bool,
}

impl Spinner {
    /// Spinner that only draws when stderr is a terminal
    pub fn new() -> Self {
        Spinner {
            frame: 0,
            last_draw: None,
            visible: false,
            enabled: io::stderr().is_terminal(),
        }
    }

    /// Draw the next frame if the previous one has been up long enough
    pub fn tick(&mut self) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if self
            .last_draw
            .is_some_and(|drawn| drawn.elapsed() < SPINNER_INTERVAL)
        {
            return Ok(());
        }

        let mut stderr = io::stderr();
        queue!(
            stderr,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(format!("{} running...", SPINNER_FRAMES[self.frame]).cyan())
        )?;
        stderr.flush()?;

        self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
        self.last_draw = Some(Instant::now());
        self.visible = true;
        Ok(())
    }

    /// Erase the spinner line so a message can be printed in its place
    pub fn clear(&mut self) -> io::Result<()> {
        if !self.visible {
            return Ok(());
        }
        let mut stderr = io::stderr();
        queue!(stderr, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        stderr.flush()?;
        self.visible = false;
        self.last_draw = None;
        Ok(())
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

/// Step hook for console runs: sleeps between steps and keeps the spinner moving
pub struct ConsolePacer {
    spinner: Spinner,
}

impl ConsolePacer {
    pub fn new() -> Self {
        ConsolePacer {
            spinner: Spinner::new(),
        }
    }

    /// Remove the spinner before the final report
    pub fn finish(&mut self) {
        // A failed redraw only leaves a stale spinner frame behind
        let _ = self.spinner.clear();
    }
}

impl Default for ConsolePacer {
    fn default() -> Self {
        Self::new()
    }
}

impl StepHook for ConsolePacer {
    fn pause(&mut self, delay: Duration, _interpreter: &Interpreter) {
        let _ = self.spinner.tick();
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    fn report(&mut self, diagnostic: &Diagnostic) {
        let _ = self.spinner.clear();
        let _ = print_diagnostic(&mut io::stderr(), diagnostic);
    }
}

/// Render a diagnostic as it appears on the console, without a trailing newline
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    let mut text = match diagnostic.severity {
        Severity::Info => diagnostic.message.as_str().cyan().to_string(),
        Severity::Warning => format!(
            "{} {}",
            "warning:".yellow().bold(),
            diagnostic.message.as_str().yellow()
        ),
        Severity::Fatal => format!("{} {}", "error:".red().bold(), diagnostic.message),
    };
    if let Some(trace) = &diagnostic.trace {
        text.push_str(&format!("\n  {}", trace.to_string().cyan()));
    }
    text
}

pub fn print_diagnostic<W: Write>(out: &mut W, diagnostic: &Diagnostic) -> io::Result<()> {
    writeln!(out, "{}", format_diagnostic(diagnostic))
}

/// Summary lines for a finished run
pub fn format_completion(completion: &Completion) -> String {
    format!(
        "{}{}\n{} {}",
        "finished".green().bold(),
        format!(" in {}", format_elapsed(completion.elapsed)).cyan(),
        "output:".white().bold(),
        completion.output
    )
}

pub fn print_completion<W: Write>(out: &mut W, completion: &Completion) -> io::Result<()> {
    writeln!(out, "{}", format_completion(completion))
}

/// Process exit status for a run: 0 on completion or halt, 1 on a fatal error
pub fn exit_code(result: &Result<Completion, RuntimeError>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// Human-readable run time: `850ms`, `1.2s` or `2m 5s`
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    if millis < 1_000 {
        format!("{}ms", millis)
    } else if millis < 60_000 {
        format!("{:.1}s", elapsed.as_secs_f64())
    } else {
        let secs = elapsed.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
