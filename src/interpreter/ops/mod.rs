pub mod function;
pub mod output;

// Dispatch works on `State` alone, so function replay is a plain recursive
// call over the same state.
use crate::interpreter::errors::ErrorKind;
use crate::memory::State;
use crate::parser::{Instruction, Opcode};

/// Execute one validated instruction against `state`.
///
/// Halting only raises `state.halted`; the caller checks the flag and stops.
pub fn apply(instruction: Instruction, state: &mut State) -> Result<(), ErrorKind> {
    let operand = instruction.operand;
    match instruction.opcode {
        Opcode::Add => state.register.add(operand),
        Opcode::Subtract => state.register.sub(operand),
        Opcode::Multiply => state.register.mul(operand),
        Opcode::Divide => state.register.div(operand),
        Opcode::Modulo => state.register.rem(operand),
        Opcode::Output => output::emit(operand, state),
        Opcode::Function => function::function(operand, state),
        Opcode::Mode => function::switch_mode(operand, state),
        Opcode::Halt => {
            state.halted = true;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Mode;

    fn run(state: &mut State, instructions: &[(u8, Opcode)]) -> Result<(), ErrorKind> {
        for &(operand, opcode) in instructions {
            apply(Instruction::new(operand, opcode), state)?;
        }
        Ok(())
    }

    #[test]
    fn test_arithmetic_sequence() {
        let mut state = State::new();
        run(
            &mut state,
            &[
                (9, Opcode::Add),
                (3, Opcode::Multiply),
                (4, Opcode::Subtract),
                (2, Opcode::Divide),
                (5, Opcode::Modulo),
            ],
        )
        .unwrap();
        // ((9 * 3) - 4) / 2 = 11, 11 % 5 = 1
        assert_eq!(state.register.value(), 1);
    }

    #[test]
    fn test_halt_sets_flag() {
        let mut state = State::new();
        apply(Instruction::new(0, Opcode::Halt), &mut state).unwrap();
        assert!(state.halted);
    }

    #[test]
    fn test_divide_by_zero_regardless_of_register() {
        for start in [0u8, 5, 9] {
            let mut state = State::new();
            state.register.add(start).unwrap();
            assert_eq!(
                apply(Instruction::new(0, Opcode::Divide), &mut state),
                Err(ErrorKind::DivisionByZero)
            );
            assert_eq!(
                apply(Instruction::new(0, Opcode::Modulo), &mut state),
                Err(ErrorKind::DivisionByZero)
            );
        }
    }

    #[test]
    fn test_mode_switch() {
        let mut state = State::new();
        apply(Instruction::new(1, Opcode::Mode), &mut state).unwrap();
        assert_eq!(state.mode, Mode::Declaring);
        apply(Instruction::new(0, Opcode::Mode), &mut state).unwrap();
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(
            apply(Instruction::new(2, Opcode::Mode), &mut state),
            Err(ErrorKind::InvalidOpcode(2))
        );
    }
}
