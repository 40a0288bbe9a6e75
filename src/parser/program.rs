// Program buffer: the scanned source with indexed access

use super::lexer::{Lexer, RawToken};

/// A naz program as an ordered list of raw slices
#[derive(Debug, Clone)]
pub struct Program {
    source: String,
    tokens: Vec<RawToken>,
}

impl Program {
    pub fn new(source: &str) -> Self {
        Program {
            source: source.to_string(),
            tokens: Lexer::new(source).scan(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&RawToken> {
        self.tokens.get(index)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The text the program was scanned from
    pub fn source(&self) -> &str {
        &self.source
    }
}
