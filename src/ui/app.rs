//! Main TUI application state and logic
//!
//! The viewer never executes anything itself. The program has already run to
//! completion with history recording on; the app only moves a cursor over the
//! recorded snapshots.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::parser::SourceLocation;
use crate::snapshot::Snapshot;
use crate::ui::panes::{self, SourceScrollState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Output,
    Machine,
    Functions,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> output -> machine -> functions)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Machine,
            FocusedPane::Machine => FocusedPane::Functions,
            FocusedPane::Functions => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Functions,
            FocusedPane::Output => FocusedPane::Source,
            FocusedPane::Machine => FocusedPane::Output,
            FocusedPane::Functions => FocusedPane::Machine,
        }
    }
}

/// History entry at `position`, or `fallback` when none was recorded
fn snapshot_at<'a>(
    interpreter: &'a Interpreter,
    fallback: &'a Snapshot,
    position: usize,
) -> &'a Snapshot {
    interpreter
        .history()
        .and_then(|history| history.get(position))
        .unwrap_or(fallback)
}

/// The main application state
pub struct App {
    /// The interpreter, already run, holding the snapshot history
    pub interpreter: Interpreter,

    /// Fatal error the run ended with, if any
    pub error: Option<RuntimeError>,

    /// Index into the snapshot history
    pub position: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: SourceScrollState,
    pub functions_scroll: usize,
    pub output_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Time between two auto-play steps
    pub play_interval: Duration,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,

    /// Final machine state, shown when no history was recorded
    final_snapshot: Snapshot,
}

impl App {
    /// Create a new app over a finished run
    pub fn new(
        interpreter: Interpreter,
        error: Option<RuntimeError>,
        play_interval: Duration,
    ) -> Self {
        let final_snapshot = Snapshot::capture(
            interpreter.state(),
            interpreter.steps(),
            interpreter.position(),
            interpreter.current_location(),
        );
        let status_message = match interpreter.diagnostics().last() {
            Some(diagnostic) => diagnostic.message.clone(),
            None => String::from("Ready!"),
        };

        App {
            interpreter,
            error,
            position: 0,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            functions_scroll: 0,
            output_scroll: 0,
            should_quit: false,
            status_message,
            is_playing: false,
            play_interval,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
            final_snapshot,
        }
    }

    /// Number of recorded snapshots (at least one)
    pub fn total_steps(&self) -> usize {
        self.interpreter
            .history()
            .map_or(0, |history| history.len())
            .max(1)
    }

    /// Snapshot under the cursor
    pub fn snapshot(&self) -> &Snapshot {
        snapshot_at(&self.interpreter, &self.final_snapshot, self.position)
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.total_steps()
    }

    /// The error, but only once the cursor reaches the last step
    pub fn visible_error(&self) -> Option<&RuntimeError> {
        self.error.as_ref().filter(|_| self.is_at_end())
    }

    /// Start of the token to mark in the source pane
    ///
    /// Normally the last processed token; on a failed run's last step, the
    /// token that raised the error.
    pub fn current_token(&self) -> Option<SourceLocation> {
        let snapshot = self.snapshot();
        let index = if self.visible_error().is_some() {
            Some(snapshot.position)
        } else {
            snapshot.position.checked_sub(1)
        };
        index
            .and_then(|index| self.interpreter.program().get(index))
            .map(|token| token.location)
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= self.play_interval {
                if self.advance() {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Machine (top) | Functions (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Min(0)])
            .split(columns[1]);

        let current_token = self.current_token();
        let error_line = self.visible_error().map(|error| error.location.line);
        // Borrow through the fields so the scroll offsets stay mutable
        let snapshot = snapshot_at(&self.interpreter, &self.final_snapshot, self.position);

        panes::render_source_pane(
            frame,
            left_rows[0],
            self.interpreter.program().source(),
            current_token,
            error_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_output_pane(
            frame,
            left_rows[1],
            &snapshot.output,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        panes::render_machine_pane(
            frame,
            right_rows[0],
            snapshot,
            self.focused_pane == FocusedPane::Machine,
        );

        panes::render_functions_pane(
            frame,
            right_rows[1],
            &snapshot.functions,
            snapshot.recording,
            self.focused_pane == FocusedPane::Functions,
            &mut self.functions_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.position,
            self.total_steps(),
            self.visible_error(),
            self.is_playing,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = (c as u8 - b'0') as usize;
                let stepped = (0..n).take_while(|_| self.advance()).count();
                self.status_message = format!("Stepped forward {} step(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Functions => {
                    self.functions_scroll = self.functions_scroll.saturating_sub(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_sub(1);
                }
                FocusedPane::Machine => {}
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling down makes the current line move up visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Functions => {
                    self.functions_scroll = self.functions_scroll.saturating_add(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_add(1);
                }
                FocusedPane::Machine => {}
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(self.play_interval)
                            .unwrap_or_else(Instant::now);
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.position = self.total_steps() - 1;
                self.output_scroll = usize::MAX;
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.position = 0;
                self.output_scroll = usize::MAX;
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    /// Move the cursor one snapshot forward; false at the end
    fn advance(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.position += 1;
        // Auto-scroll output to bottom
        self.output_scroll = usize::MAX;
        true
    }

    fn step_forward(&mut self) {
        if self.advance() {
            self.status_message = "Stepped forward".to_string();
        } else {
            self.status_message = "Cannot step forward: end of execution".to_string();
        }
    }

    fn step_backward(&mut self) {
        if self.position == 0 {
            self.status_message = "Cannot step backward: start of execution".to_string();
            return;
        }
        self.position -= 1;
        self.output_scroll = usize::MAX;
        self.status_message = "Stepped backward".to_string();
    }
}
