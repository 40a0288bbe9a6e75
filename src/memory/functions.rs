//! Function slots
//!
//! Ten slots addressed by the digits 0-9. A slot is undeclared while its body
//! is empty. Recording only ever appends, so a slot that has been declared
//! stays declared for the rest of the run.

use crate::interpreter::constants::FUNCTION_SLOTS;
use crate::parser::Instruction;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionTable {
    slots: [Vec<Instruction>; FUNCTION_SLOTS],
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `instruction` to the body of `slot`
    pub fn record(&mut self, slot: u8, instruction: Instruction) {
        self.slots[slot as usize].push(instruction);
    }

    /// The recorded body, or `None` while the slot is undeclared
    pub fn body(&self, slot: u8) -> Option<&[Instruction]> {
        let body = self.slots.get(slot as usize)?;
        if body.is_empty() {
            None
        } else {
            Some(body)
        }
    }

    pub fn is_declared(&self, slot: u8) -> bool {
        self.body(slot).is_some()
    }

    /// All slots in order, declared or not
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[Instruction])> {
        self.slots
            .iter()
            .enumerate()
            .map(|(slot, body)| (slot as u8, body.as_slice()))
    }

    /// Total number of recorded instructions
    pub fn instruction_count(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }
}
