// Output buffer and per-step history for the trace viewer

use crate::memory::functions::FunctionTable;
use crate::memory::{Mode, State};
use crate::parser::SourceLocation;

/// Append-only program output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    text: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        OutputBuffer {
            text: String::new(),
        }
    }

    /// Append `count` copies of `ch`
    pub fn push_repeated(&mut self, ch: char, count: usize) {
        self.text.extend(std::iter::repeat(ch).take(count));
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Split output into display lines, keeping a trailing empty line when the
/// text ends with a line break so the cursor position stays visible.
pub fn output_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').collect()
}

/// Copy of the machine state after one step
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub step: usize,
    pub position: usize,
    pub location: Option<SourceLocation>,
    pub register: i32,
    pub mode: Mode,
    pub recording: Option<u8>,
    pub functions: FunctionTable,
    pub output: String,
    pub halted: bool,
}

impl Snapshot {
    pub fn capture(
        state: &State,
        step: usize,
        position: usize,
        location: Option<SourceLocation>,
    ) -> Self {
        Snapshot {
            step,
            position,
            location,
            register: state.register.value(),
            mode: state.mode,
            recording: state.recording,
            functions: state.functions.clone(),
            output: state.output.as_str().to_string(),
            halted: state.halted,
        }
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough: fixed fields plus the two growable parts
        let instruction_size = std::mem::size_of::<crate::parser::Instruction>();
        std::mem::size_of::<Snapshot>()
            + self.functions.instruction_count() * instruction_size
            + self.output.len()
    }
}

/// Manages execution history for the trace viewer
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), String> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(format!(
                "snapshot memory limit exceeded: {} + {} > {}",
                self.current_memory, snapshot_size, self.max_memory
            ));
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_repeated() {
        let mut out = OutputBuffer::new();
        out.push_repeated('3', 1);
        out.push_repeated('3', 5);
        out.push_repeated('x', 0);
        assert_eq!(out.as_str(), "333333");
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn test_output_lines() {
        assert!(output_lines("").is_empty());
        assert_eq!(output_lines("hi\nthere"), vec!["hi", "there"]);
        assert_eq!(output_lines("hi\n"), vec!["hi", ""]);
    }

    #[test]
    fn test_manager_enforces_limit() {
        let state = State::new();
        let snapshot = Snapshot::capture(&state, 0, 0, None);
        let size = snapshot.estimated_size();

        let mut manager = SnapshotManager::new(size * 2);
        assert!(manager.push(snapshot.clone()).is_ok());
        assert!(manager.push(snapshot.clone()).is_ok());
        assert!(manager.push(snapshot).is_err());
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.memory_usage(), size * 2);
    }

    #[test]
    fn test_capture_copies_state() {
        let mut state = State::new();
        state.register.add(4).unwrap();
        state.output.push_repeated('4', 2);
        state.mode = Mode::Declaring;

        let snapshot = Snapshot::capture(&state, 3, 5, Some(SourceLocation::new(1, 6)));
        state.register.add(1).unwrap();

        assert_eq!(snapshot.register, 4);
        assert_eq!(snapshot.output, "44");
        assert_eq!(snapshot.mode, Mode::Declaring);
        assert_eq!(snapshot.step, 3);
    }
}
