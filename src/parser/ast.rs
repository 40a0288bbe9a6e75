// Instruction-level types shared by the scanner, the dispatcher and the UI

use std::fmt;

/// Line and column of a slice in the program text. Both are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Location of the opcode half of the instruction starting here
    pub fn opcode(self) -> Self {
        Self::new(self.line, self.column + 1)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The nine naz opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Add,      // a
    Divide,   // d
    Function, // f
    Halt,     // h
    Multiply, // m
    Output,   // o
    Modulo,   // p
    Subtract, // s
    Mode,     // x
}

impl Opcode {
    pub const ALL: [Opcode; 9] = [
        Opcode::Add,
        Opcode::Divide,
        Opcode::Function,
        Opcode::Halt,
        Opcode::Multiply,
        Opcode::Output,
        Opcode::Modulo,
        Opcode::Subtract,
        Opcode::Mode,
    ];

    /// Look up the opcode written as `letter`.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'a' => Some(Opcode::Add),
            'd' => Some(Opcode::Divide),
            'f' => Some(Opcode::Function),
            'h' => Some(Opcode::Halt),
            'm' => Some(Opcode::Multiply),
            'o' => Some(Opcode::Output),
            'p' => Some(Opcode::Modulo),
            's' => Some(Opcode::Subtract),
            'x' => Some(Opcode::Mode),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Opcode::Add => 'a',
            Opcode::Divide => 'd',
            Opcode::Function => 'f',
            Opcode::Halt => 'h',
            Opcode::Multiply => 'm',
            Opcode::Output => 'o',
            Opcode::Modulo => 'p',
            Opcode::Subtract => 's',
            Opcode::Mode => 'x',
        }
    }
}

/// A validated operand/opcode pair such as `3a`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub operand: u8,
    pub opcode: Opcode,
}

impl Instruction {
    pub fn new(operand: u8, opcode: Opcode) -> Self {
        debug_assert!(operand <= 9);
        Self { operand, opcode }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operand, self.opcode.letter())
    }
}

/// What a program position decodes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    LineBreak,
    Instruction(Instruction),
}
