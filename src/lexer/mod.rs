//! Lexical analysis for the Monkey language.
//!
//! The [`Scanner`] walks the source one byte at a time and hands out one
//! [`Token`] per call. Keyword resolution depends on the configured
//! [`Grammar`]; everything else is fixed vocabulary.

mod scanner;
mod token;

pub use scanner::{format_tokens, tokenize, ScanOptions, Scanner, TokenWithPosition};
pub use token::{lookup_ident, Grammar, Token, TokenKind};
