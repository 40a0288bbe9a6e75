//! The `f` and `x` opcodes
//!
//! `f` does two jobs. In [`Mode::Normal`] it invokes a slot: the recorded body
//! is replayed through [`apply`](super::apply) against the same state, so the
//! register, the slots and the halt flag are shared across nesting levels. In
//! [`Mode::Declaring`] it only arms recording; the stepper then appends the
//! rest of the line to that slot.

use crate::interpreter::constants::MAX_CALL_DEPTH;
use crate::interpreter::errors::ErrorKind;
use crate::memory::{Mode, State};
use crate::parser::Instruction;

pub fn function(slot: u8, state: &mut State) -> Result<(), ErrorKind> {
    match state.mode {
        Mode::Declaring => {
            state.recording = Some(slot);
            Ok(())
        }
        Mode::Normal => invoke(slot, state),
    }
}

pub fn switch_mode(operand: u8, state: &mut State) -> Result<(), ErrorKind> {
    state.mode = match operand {
        0 => Mode::Normal,
        1 => Mode::Declaring,
        _ => return Err(ErrorKind::InvalidOpcode(operand)),
    };
    Ok(())
}

fn invoke(slot: u8, state: &mut State) -> Result<(), ErrorKind> {
    let body = state
        .functions
        .body(slot)
        .ok_or(ErrorKind::UndeclaredFunction(slot))?
        .to_vec();

    if state.depth >= MAX_CALL_DEPTH {
        return Err(ErrorKind::DepthExceeded);
    }

    state.depth += 1;
    let result = replay(&body, state);
    state.depth -= 1;
    result
}

fn replay(body: &[Instruction], state: &mut State) -> Result<(), ErrorKind> {
    for &instruction in body {
        if state.halted {
            break;
        }
        super::apply(instruction, state)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Opcode;

    fn declare(state: &mut State, slot: u8, body: &[(u8, Opcode)]) {
        for &(operand, opcode) in body {
            state.functions.record(slot, Instruction::new(operand, opcode));
        }
    }

    #[test]
    fn test_declaring_mode_arms_recording() {
        let mut state = State::new();
        state.mode = Mode::Declaring;
        function(4, &mut state).unwrap();
        assert_eq!(state.recording, Some(4));
        assert!(!state.functions.is_declared(4));
    }

    #[test]
    fn test_invoke_replays_body() {
        let mut state = State::new();
        declare(&mut state, 2, &[(3, Opcode::Add), (2, Opcode::Output)]);
        function(2, &mut state).unwrap();
        function(2, &mut state).unwrap();
        assert_eq!(state.register.value(), 6);
        assert_eq!(state.output.as_str(), "3366");
        assert_eq!(state.depth, 0);
    }

    #[test]
    fn test_invoke_undeclared() {
        let mut state = State::new();
        assert_eq!(
            function(7, &mut state),
            Err(ErrorKind::UndeclaredFunction(7))
        );
    }

    #[test]
    fn test_nested_invocation() {
        let mut state = State::new();
        declare(&mut state, 1, &[(2, Opcode::Add)]);
        declare(&mut state, 2, &[(1, Opcode::Function), (1, Opcode::Function)]);
        function(2, &mut state).unwrap();
        assert_eq!(state.register.value(), 4);
    }

    #[test]
    fn test_halt_stops_replay() {
        let mut state = State::new();
        declare(
            &mut state,
            0,
            &[(1, Opcode::Add), (0, Opcode::Halt), (1, Opcode::Add)],
        );
        function(0, &mut state).unwrap();
        assert!(state.halted);
        assert_eq!(state.register.value(), 1);
    }

    #[test]
    fn test_self_invocation_hits_depth_limit() {
        let mut state = State::new();
        declare(&mut state, 3, &[(3, Opcode::Function)]);
        assert_eq!(function(3, &mut state), Err(ErrorKind::DepthExceeded));
        assert_eq!(state.depth, 0);
    }
}
