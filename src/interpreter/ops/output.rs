//! The `o` opcode
//!
//! The register picks the character and the operand picks how many copies are
//! appended:
//!
//! | register | character |
//! |---|---|
//! | 0-9 | the decimal digit |
//! | 10 | line break |
//! | 32-126 | that ASCII character |
//!
//! Any other register value is an error, even when the operand is 0.

use crate::interpreter::errors::ErrorKind;
use crate::memory::State;

/// Character the register value prints as, if any
pub fn map_register(value: i32) -> Option<char> {
    match value {
        0..=9 => char::from_digit(value as u32, 10),
        10 => Some('\n'),
        32..=126 => Some(value as u8 as char),
        _ => None,
    }
}

pub fn emit(count: u8, state: &mut State) -> Result<(), ErrorKind> {
    let value = state.register.value();
    let ch = map_register(value).ok_or(ErrorKind::InvalidOutputValue(value))?;
    state.output.push_repeated(ch, count as usize);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping() {
        assert_eq!(map_register(0), Some('0'));
        assert_eq!(map_register(9), Some('9'));
        assert_eq!(map_register(10), Some('\n'));
        assert_eq!(map_register(32), Some(' '));
        assert_eq!(map_register(104), Some('h'));
        assert_eq!(map_register(126), Some('~'));
    }

    #[test]
    fn test_unmapped_values() {
        for value in [-1, 11, 20, 31, 127, -127] {
            assert_eq!(map_register(value), None, "value {}", value);
        }
    }

    #[test]
    fn test_operand_is_repeat_count() {
        let mut state = State::new();
        emit(9, &mut state).unwrap();
        assert_eq!(state.output.as_str(), "000000000");
    }

    #[test]
    fn test_invalid_value_with_zero_count() {
        let mut state = State::new();
        state.register.sub(1).unwrap();
        assert_eq!(emit(0, &mut state), Err(ErrorKind::InvalidOutputValue(-1)));
        assert!(state.output.is_empty());
    }
}
