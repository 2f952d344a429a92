//! Abstract Syntax Tree (AST) definitions for the Monkey language.
//!
//! These are plain data carriers for a parser to populate; nothing in this
//! crate builds them from tokens.

use serde::{Deserialize, Serialize};

mod expressions;
mod program;
mod statements;

pub use expressions::{Expression, Identifier};
pub use program::Program;
pub use statements::{LetStatement, ReturnStatement, Statement};

/// Span information for source location tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// Capability shared by every AST node
pub trait Node {
    /// Literal of the token the node starts with, for diagnostics
    fn token_literal(&self) -> &str;
}
