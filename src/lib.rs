//! Monkey Language Scanner Library
//!
//! Converts Monkey source text into a stream of typed tokens, and defines the
//! AST node types a parser would build from them.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod session;

// Re-export commonly used types
pub use ast::{Node, Program, Span, Statement};
pub use error::{ErrorCollector, MonkeyError, MonkeyResult, ScanError};
pub use lexer::{Grammar, ScanOptions, Scanner, Token, TokenKind, TokenWithPosition};
pub use session::ScanSession;
