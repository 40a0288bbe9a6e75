//! Scanner and validator for naz source text
//!
//! [`Lexer::scan`] cuts the source into [`RawToken`]s: a line break (`\n` or
//! `\r\n`) or the next two characters, whatever they are. Scanning never
//! fails. Shape checks happen later in [`RawToken::decode`], one position at
//! a time, so a malformed slice is only reported once execution reaches it.

use super::ast::{Instruction, Opcode, SourceLocation, Token};
use std::fmt;

/// One undecoded program position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    LineBreak,
    /// Two characters, or one when the input ends mid-instruction
    Pair(char, Option<char>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken {
    pub slice: Slice,
    pub location: SourceLocation,
}

/// Malformed instruction shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// An opcode letter where the operand belongs, or an unknown letter after a digit
    InvalidInstruction,
    /// Something that is neither a digit nor an opcode where the operand belongs
    MissingNumberLiteral,
    /// A digit followed by a line break or the end of input
    MissingInstruction,
    /// A digit followed by another digit
    ChainedNumberLiterals,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::InvalidInstruction => write!(f, "invalid instruction"),
            FormatError::MissingNumberLiteral => write!(f, "missing number literal"),
            FormatError::MissingInstruction => {
                write!(f, "number literal missing an instruction")
            }
            FormatError::ChainedNumberLiterals => write!(f, "attempt to chain number literals"),
        }
    }
}

impl std::error::Error for FormatError {}

impl RawToken {
    /// Validate the slice and split it into operand and opcode.
    pub fn decode(&self) -> Result<Token, FormatError> {
        let (first, second) = match self.slice {
            Slice::LineBreak => return Ok(Token::LineBreak),
            Slice::Pair(first, second) => (first, second),
        };

        let operand = match first.to_digit(10) {
            Some(digit) => digit as u8,
            None if Opcode::from_letter(first).is_some() => {
                return Err(FormatError::InvalidInstruction)
            }
            None => return Err(FormatError::MissingNumberLiteral),
        };

        match second {
            None | Some('\r') | Some('\n') => Err(FormatError::MissingInstruction),
            Some(c) if c.is_ascii_digit() => Err(FormatError::ChainedNumberLiterals),
            Some(c) => Opcode::from_letter(c)
                .map(|opcode| Token::Instruction(Instruction::new(operand, opcode)))
                .ok_or(FormatError::InvalidInstruction),
        }
    }
}

/// Scanner for naz source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Cut the entire input into raw slices
    pub fn scan(&mut self) -> Vec<RawToken> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_slice() {
            tokens.push(token);
        }
        tokens
    }

    fn next_slice(&mut self) -> Option<RawToken> {
        let location = self.current_location();
        let first = self.peek()?;

        if first == '\n' || (first == '\r' && self.peek_ahead(1) == Some('\n')) {
            if first == '\r' {
                self.advance();
            }
            self.advance();
            return Some(RawToken {
                slice: Slice::LineBreak,
                location,
            });
        }

        self.advance();
        // The second character is taken whatever it is; a line break here
        // makes the slice malformed.
        let second = self.advance();
        Some(RawToken {
            slice: Slice::Pair(first, second),
            location,
        })
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else if ch != '\r' {
            self.column += 1;
        }

        Some(ch)
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<RawToken> {
        Lexer::new(source).scan()
    }

    fn decode_one(slice: &str) -> Result<Token, FormatError> {
        scan(slice)[0].decode()
    }

    #[test]
    fn test_pairs_and_line_breaks() {
        let tokens = scan("1a2o\n3h");
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].slice, Slice::Pair('1', Some('a')));
        assert_eq!(tokens[1].location, SourceLocation::new(1, 3));
        assert_eq!(tokens[2].slice, Slice::LineBreak);
        assert_eq!(tokens[2].location, SourceLocation::new(1, 5));
        assert_eq!(tokens[3].location, SourceLocation::new(2, 1));
    }

    #[test]
    fn test_crlf_is_one_line_break() {
        let tokens = scan("1a\r\n1a");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].slice, Slice::LineBreak);
        assert_eq!(tokens[2].location, SourceLocation::new(2, 1));
    }

    #[test]
    fn test_empty_lines() {
        let tokens = scan("\n\n1a");
        assert_eq!(tokens[0].slice, Slice::LineBreak);
        assert_eq!(tokens[1].slice, Slice::LineBreak);
        assert_eq!(tokens[2].location, SourceLocation::new(3, 1));
    }

    #[test]
    fn test_decode_valid_instruction() {
        assert_eq!(
            decode_one("7m"),
            Ok(Token::Instruction(Instruction::new(7, Opcode::Multiply)))
        );
        assert_eq!(decode_one("\n"), Ok(Token::LineBreak));
    }

    #[test]
    fn test_opcode_in_operand_position() {
        assert_eq!(decode_one("a1"), Err(FormatError::InvalidInstruction));
        assert_eq!(decode_one("xx"), Err(FormatError::InvalidInstruction));
    }

    #[test]
    fn test_missing_number_literal() {
        assert_eq!(decode_one("qa"), Err(FormatError::MissingNumberLiteral));
        assert_eq!(decode_one(" 1"), Err(FormatError::MissingNumberLiteral));
        assert_eq!(decode_one("\r1"), Err(FormatError::MissingNumberLiteral));
    }

    #[test]
    fn test_digit_before_line_break_or_end() {
        assert_eq!(decode_one("1\n"), Err(FormatError::MissingInstruction));
        assert_eq!(decode_one("1\r\n"), Err(FormatError::MissingInstruction));
        assert_eq!(decode_one("1"), Err(FormatError::MissingInstruction));
    }

    #[test]
    fn test_chained_digits() {
        assert_eq!(decode_one("12"), Err(FormatError::ChainedNumberLiterals));
    }

    #[test]
    fn test_unknown_opcode_letter() {
        assert_eq!(decode_one("1z"), Err(FormatError::InvalidInstruction));
        assert_eq!(decode_one("1A"), Err(FormatError::InvalidInstruction));
    }

    #[test]
    fn test_odd_line_shifts_following_slices() {
        // "1a1" + newline: the third slice swallows the line break.
        let tokens = scan("1a1\n2a");
        assert_eq!(tokens[1].slice, Slice::Pair('1', Some('\n')));
        assert_eq!(tokens[2].location, SourceLocation::new(2, 1));
    }
}
