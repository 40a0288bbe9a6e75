// naz: stepping interpreter with a console runner and a trace viewer

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use naz::console::{self, ConsolePacer};
use naz::interpreter::constants::DEFAULT_SNAPSHOT_LIMIT;
use naz::interpreter::diagnostics::Diagnostic;
use naz::interpreter::engine::{Interpreter, NoPacing};
use naz::ui::App;

/// Default pause between console steps
const DEFAULT_CONSOLE_DELAY_MS: u64 = 1;

/// Default auto-play interval in the trace viewer
const DEFAULT_PLAY_INTERVAL_MS: u64 = 500;

#[derive(Parser)]
#[command(name = "naz", version, about = "Stepping interpreter for the naz language")]
struct Cli {
    /// Program to run.
    file: PathBuf,

    /// Milliseconds between steps (auto-play interval with --tui); 0 disables pacing.
    #[arg(short, long)]
    delay: Option<u64>,

    /// Record every step and open the trace viewer afterwards.
    #[arg(long)]
    tui: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            let message = format!("{}: {}", cli.file.display(), e);
            let _ = console::print_diagnostic(&mut io::stderr(), &Diagnostic::fatal(message));
            std::process::exit(1);
        }
    };
    let file = cli.file.display().to_string();

    if cli.tui {
        let interval = Duration::from_millis(cli.delay.unwrap_or(DEFAULT_PLAY_INTERVAL_MS));
        run_viewer(&source, file, interval)
    } else {
        let delay = Duration::from_millis(cli.delay.unwrap_or(DEFAULT_CONSOLE_DELAY_MS));
        run_console(&source, file, delay)
    }
}

/// Execute with pacing and print the result
fn run_console(
    source: &str,
    file: String,
    delay: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut interpreter = Interpreter::new(source, file).with_delay(delay);
    let mut pacer = ConsolePacer::new();
    let result = interpreter.run(&mut pacer);
    pacer.finish();

    match &result {
        Ok(completion) => console::print_completion(&mut io::stdout(), completion)?,
        Err(e) => console::print_diagnostic(&mut io::stderr(), &Diagnostic::from(e))?,
    }

    let code = console::exit_code(&result);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Execute with history recording, then browse the run in the TUI
fn run_viewer(
    source: &str,
    file: String,
    interval: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stderr = io::stderr();
    console::print_diagnostic(
        &mut stderr,
        &Diagnostic::info(format!("Executing {}...", file)),
    )?;

    let mut interpreter = Interpreter::new(source, file).with_history(DEFAULT_SNAPSHOT_LIMIT);
    let result = interpreter.run(&mut NoPacing);
    match &result {
        Ok(completion) => {
            eprintln!("Execution completed in {} step(s).", completion.steps);
        }
        Err(e) => {
            console::print_diagnostic(&mut stderr, &Diagnostic::from(e))?;
            eprintln!("Entering TUI with partial execution history...");
        }
    }
    for diagnostic in interpreter.diagnostics() {
        console::print_diagnostic(&mut stderr, diagnostic)?;
    }
    if let Some(history) = interpreter.history() {
        let message = format!(
            "Recorded {} snapshot(s), {} of {} KiB.",
            history.len(),
            history.memory_usage() / 1024,
            history.memory_limit() / 1024
        );
        console::print_diagnostic(&mut stderr, &Diagnostic::info(message))?;
    }
    let code = console::exit_code(&result);
    let error = result.err();

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(interpreter, error, interval);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
